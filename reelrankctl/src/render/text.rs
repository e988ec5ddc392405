use std::fmt::{self, Write};

use reelrank_model::{MovieRecord, RankedList, Summary};

/// Plain-text report, one section per ranking.
pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    // fmt::Write for String never returns an error
    write_summary(&mut out, summary)
        .map(|()| out)
        .unwrap_or_default()
}

fn write_summary(out: &mut String, summary: &Summary) -> fmt::Result {
    writeln!(out, "Total movies: {}", summary.total_count)?;

    writeln!(out, "\nTop per year")?;
    if summary.top_per_year.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (year, list) in &summary.top_per_year {
        writeln!(out, "  {year}")?;
        write_list(out, list, "    ", |_| None)?;
    }

    writeln!(out, "\nTop of all time")?;
    write_list(out, &summary.top_all_time, "  ", |_| None)?;

    writeln!(out, "\nUnderrated by you")?;
    write_list(out, &summary.underrated_by_viewer, "  ", |r| {
        Some(r.underrated_delta())
    })?;

    writeln!(out, "\nOverrated by you")?;
    write_list(out, &summary.overrated_by_viewer, "  ", |r| {
        Some(r.overrated_delta())
    })
}

fn write_list(
    out: &mut String,
    list: &RankedList,
    indent: &str,
    delta: impl Fn(&MovieRecord) -> Option<f64>,
) -> fmt::Result {
    if list.is_empty() {
        return writeln!(out, "{indent}(none)");
    }

    for (rank, record) in list.iter().enumerate() {
        write!(
            out,
            "{indent}{:>2}. {} ({}) - you {}, public {:.1}",
            rank + 1,
            record.title(),
            record.year(),
            record.viewer_rating(),
            record.public_rating(),
        )?;
        if let Some(delta) = delta(record) {
            write!(out, " [{delta:+.1}]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
