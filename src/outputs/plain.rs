//! Plain text report rendering.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::models::Report;

/// Render the report as plain text.
///
/// An empty report renders as a single notice line. Otherwise a generation
/// header is followed by each story title, its canonical video URLs indented
/// by two spaces, and an 80-dash separator. Stories whose page fetch failed
/// are listed at the end.
pub fn render(report: &Report, generated_at: DateTime<Local>, secure: bool, hide_empty: bool) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("No stories or no new stories found.\n");
    } else {
        writeln!(
            out,
            "List generated on {}:\n",
            generated_at.format("%Y-%m-%d %H:%M:%S%.6f")
        )
        .unwrap();

        for entry in &report.entries {
            if hide_empty && entry.references.is_empty() {
                continue;
            }

            writeln!(out, "{}", entry.title).unwrap();
            for vref in &entry.references {
                if let Some(url) = vref.playback_url(secure) {
                    writeln!(out, "  {url}").unwrap();
                }
            }
            writeln!(out, "{}", "-".repeat(80)).unwrap();
        }
    }

    // The failure list renders even when no story succeeded.
    if !report.failures.is_empty() {
        writeln!(
            out,
            "\n{} {} could not be fetched:",
            report.failures.len(),
            failure_noun(report.failures.len())
        )
        .unwrap();
        for failure in &report.failures {
            writeln!(out, "  {}: {}", failure.title, failure.error).unwrap();
        }
    }

    out
}

fn failure_noun(count: usize) -> &'static str {
    if count == 1 { "story" } else { "stories" }
}
