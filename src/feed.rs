//! Feed retrieval and normalization.
//!
//! The feed is either fetched from the official URL or read from a local
//! file, then parsed with `feed-rs`. Entries are reduced to the
//! [`FeedEntry`] shape the processor consumes.

use std::error::Error;
use std::path::Path;

use feed_rs::parser;
use tracing::{info, instrument, warn};
use url::Url;

use crate::models::FeedEntry;

/// The official story feed.
pub const DEFAULT_FEED_URL: &str = "http://www.tested.com/feeds/";

/// Load the feed, preferring a local file when one is configured and exists.
///
/// # Arguments
///
/// * `file` - Optional local feed file; used only if it exists on disk
/// * `url` - Remote feed URL used otherwise
#[instrument(level = "info", skip_all)]
pub async fn load_feed(file: Option<&str>, url: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let bytes = match file {
        Some(path) if Path::new(path).is_file() => {
            info!(path, "Loading feed from file");
            tokio::fs::read(path).await?
        }
        _ => {
            info!(url, "Loading feed from URL");
            reqwest::get(url).await?.bytes().await?.to_vec()
        }
    };

    let feed = parser::parse(&bytes[..])?;
    let entries = normalize_entries(feed);
    info!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Reduce parsed feed entries to title, link, and publication time.
///
/// Entries without an absolute link cannot be processed and are skipped with
/// a warning. A missing title falls back to the link so the story still
/// shows up in the report under something identifiable.
fn normalize_entries(feed: feed_rs::model::Feed) -> Vec<FeedEntry> {
    let mut entries = Vec::new();
    for entry in feed.entries {
        let Some(href) = entry.links.first().map(|l| l.href.clone()) else {
            warn!(id = %entry.id, "Feed entry has no link; skipping");
            continue;
        };
        let link = match Url::parse(&href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(id = %entry.id, %href, error = %e, "Feed entry link is not a valid URL; skipping");
                continue;
            }
        };
        let title = entry
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| link.clone());
        entries.push(FeedEntry {
            title,
            link,
            published: entry.published,
        });
    }
    entries
}
