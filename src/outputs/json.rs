//! JSON report rendering for machine consumption.

use chrono::{DateTime, Local};
use serde_json::json;

use crate::models::Report;

/// Render the report as a JSON object.
///
/// Stories carry both the raw (provider, token) references and the resolved
/// playback URLs, so consumers do not need to know the URL templates.
pub fn render(report: &Report, generated_at: DateTime<Local>, secure: bool, hide_empty: bool) -> String {
    let stories: Vec<serde_json::Value> = report
        .entries
        .iter()
        .filter(|entry| !hide_empty || !entry.references.is_empty())
        .map(|entry| {
            let urls: Vec<String> = entry
                .references
                .iter()
                .filter_map(|vref| vref.playback_url(secure))
                .collect();
            json!({
                "title": entry.title,
                "references": entry.references,
                "urls": urls,
            })
        })
        .collect();

    let value = json!({
        "generated_on": generated_at.to_rfc3339(),
        "stories": stories,
        "failures": report.failures,
    });

    // Serializing a json! value cannot fail.
    serde_json::to_string_pretty(&value).unwrap()
}
