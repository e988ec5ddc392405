use reelrank_model::Summary;

/// Pretty-printed JSON form of the summary.
pub fn render_json(summary: &Summary) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}
