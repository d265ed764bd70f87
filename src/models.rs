//! Data models for feed entries, extracted video references, and the report.
//!
//! These are plain value types passed between the pipeline stages:
//! - [`FeedEntry`]: one story from the syndication feed
//! - [`VideoReference`]: one extracted (provider, token) pair
//! - [`Report`]: the title → references mapping built by the processor,
//!   plus the entries whose pages could not be fetched

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::providers;

/// A single story from the feed, reduced to what the processor needs.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// The story headline.
    pub title: String,
    /// Absolute URL of the story page.
    pub link: String,
    /// Publication time, if the feed carried one.
    pub published: Option<DateTime<Utc>>,
}

/// A video found on a story page, identified by provider and token.
///
/// Value object: created by the page extractor or URL classifier, consumed
/// by the renderers. Duplicates are deliberately preserved, so the same
/// video embedded twice yields two references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoReference {
    /// Provider name as registered ("youtube", "vimeo").
    pub provider: String,
    /// Opaque provider-specific video identifier.
    pub token: String,
}

impl VideoReference {
    pub fn new(provider: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            token: token.into(),
        }
    }

    /// Build the canonical playback URL for this reference.
    ///
    /// Returns `None` when the provider is not registered, which can only
    /// happen for references constructed outside the extraction pipeline.
    pub fn playback_url(&self, secure: bool) -> Option<String> {
        providers::lookup(&self.provider).map(|p| p.playback_url(&self.token, secure))
    }
}

/// One story in the report: title plus the references found on its page.
///
/// The references list may be empty; hiding such entries is a render-time
/// decision, they always stay in the report itself.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub title: String,
    pub references: Vec<VideoReference>,
}

/// A story whose page could not be fetched.
#[derive(Debug, Serialize)]
pub struct FetchFailure {
    pub title: String,
    pub error: String,
}

/// The processor's output: stories in processing order, plus failures.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Successfully processed stories, in feed processing order.
    pub entries: Vec<ReportEntry>,
    /// Stories skipped because their page fetch failed.
    pub failures: Vec<FetchFailure>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
