//! Presentation of a [`Summary`].

mod json;
mod text;

use clap::ValueEnum;
use reelrank_model::Summary;

pub use json::render_json;
pub use text::render_text;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render `summary` in the requested format. The result always ends with a
/// newline.
pub fn render(
    summary: &Summary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(summary)),
        OutputFormat::Json => render_json(summary),
    }
}
