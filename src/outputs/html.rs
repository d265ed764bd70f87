//! HTML report rendering.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::models::Report;

/// Render the report as a single HTML document.
///
/// Story titles become `<h3>` headings with a `<ul>` of linked playback
/// URLs underneath. Fetch failures, when any, are appended as their own
/// list at the end of the body.
pub fn render(report: &Report, generated_at: DateTime<Local>, secure: bool, hide_empty: bool) -> String {
    let mut out = String::from(
        "<!DOCTYPE html><html><head><title>tested.com videos</title></head><body>",
    );
    write!(
        out,
        "<p>List generated on {}",
        generated_at.format("%Y-%m-%d %H:%M:%S%.6f")
    )
    .unwrap();

    for entry in &report.entries {
        if hide_empty && entry.references.is_empty() {
            continue;
        }

        write!(out, "<h3>{}</h3><ul>", entry.title).unwrap();
        for vref in &entry.references {
            if let Some(url) = vref.playback_url(secure) {
                write!(out, "<li><a href=\"{url}\">{url}</a></li>").unwrap();
            }
        }
        out.push_str("</ul>");
    }

    if !report.failures.is_empty() {
        let noun = if report.failures.len() == 1 { "story" } else { "stories" };
        write!(
            out,
            "<p>{} {} could not be fetched:<ul>",
            report.failures.len(),
            noun
        )
        .unwrap();
        for failure in &report.failures {
            write!(out, "<li>{}: {}</li>", failure.title, failure.error).unwrap();
        }
        out.push_str("</ul>");
    }

    out.push_str("</body></html>");
    out
}
