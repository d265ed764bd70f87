//! Feed entry processing.
//!
//! Applies the skip rules, fetches each remaining story page, and runs the
//! extractor over it, accumulating `title -> references` in feed order
//! (or reversed feed order when requested).
//!
//! Page fetches run a few at a time, but `buffered` yields results in entry
//! order, so the report order is the feed order regardless of which fetch
//! finishes first. A failed fetch does not abort the run; the story is
//! recorded under [`Report::failures`] and the report stays partial.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use scraper::Html;
use tracing::{debug, info, instrument, warn};

use crate::extract::extract_references;
use crate::fetch::PageFetcher;
use crate::models::{FeedEntry, FetchFailure, Report, ReportEntry};

/// How many story pages are fetched at once.
const FETCH_WINDOW: usize = 4;

/// Process feed entries into a report.
///
/// # Arguments
///
/// * `fetcher` - Page fetch collaborator
/// * `entries` - Feed entries in feed order
/// * `cutoff` - Only-new cutoff; entries published strictly before it are
///   skipped (an entry published exactly at the cutoff is kept)
/// * `reverse` - Process oldest-first instead of feed order
#[instrument(level = "info", skip_all, fields(entries = entries.len()))]
pub async fn process_entries<F: PageFetcher>(
    fetcher: &F,
    mut entries: Vec<FeedEntry>,
    cutoff: Option<DateTime<Utc>>,
    reverse: bool,
) -> Report {
    if reverse {
        entries.reverse();
    }

    let entries: Vec<FeedEntry> = entries
        .into_iter()
        .filter(|entry| !should_skip(entry, cutoff))
        .collect();

    let fetched: Vec<(FeedEntry, Result<String, String>)> = stream::iter(entries)
        .map(|entry| async move {
            let body = fetcher
                .fetch(&entry.link)
                .await
                .map_err(|e| e.to_string());
            (entry, body)
        })
        .buffered(FETCH_WINDOW)
        .collect()
        .await;

    let mut report = Report::default();
    for (entry, body) in fetched {
        match body {
            Ok(html) => {
                let document = Html::parse_document(&html);
                let references = extract_references(&document);
                debug!(title = %entry.title, count = references.len(), "Processed story");
                report.entries.push(ReportEntry {
                    title: entry.title,
                    references,
                });
            }
            Err(error) => {
                warn!(title = %entry.title, link = %entry.link, %error, "Story fetch failed; continuing");
                report.failures.push(FetchFailure {
                    title: entry.title,
                    error,
                });
            }
        }
    }

    info!(
        stories = report.entries.len(),
        failures = report.failures.len(),
        "Finished processing feed entries"
    );
    report
}

/// Skip rules: only-new cutoff and premium content.
fn should_skip(entry: &FeedEntry, cutoff: Option<DateTime<Utc>>) -> bool {
    if let (Some(cutoff), Some(published)) = (cutoff, entry.published) {
        if published < cutoff {
            debug!(title = %entry.title, %published, %cutoff, "Skipping story older than cutoff");
            return true;
        }
    }

    // Premium stories are paywalled and unextractable.
    if entry.link.contains("/premium/") {
        debug!(title = %entry.title, "Skipping premium story");
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MapFetcher;
    use chrono::TimeZone;

    fn entry(title: &str, link: &str, published: Option<DateTime<Utc>>) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: link.to_string(),
            published,
        }
    }

    const VIDEO_PAGE: &str = r#"<html><body>
        <div class="embed-type-video">
          <iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>
        </div>
    </body></html>"#;

    const EMPTY_PAGE: &str = "<html><body><p>No videos here.</p></body></html>";

    #[tokio::test]
    async fn test_process_accumulates_in_feed_order() {
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/a/", VIDEO_PAGE)
            .with_page("http://www.tested.com/b/", EMPTY_PAGE);
        let entries = vec![
            entry("A", "http://www.tested.com/a/", None),
            entry("B", "http://www.tested.com/b/", None),
        ];

        let report = process_entries(&fetcher, entries, None, false).await;

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].title, "A");
        assert_eq!(report.entries[0].references.len(), 1);
        assert_eq!(report.entries[0].references[0].token, "dQw4w9WgXcQ");
        // Stories without videos stay in the report with an empty list.
        assert_eq!(report.entries[1].title, "B");
        assert!(report.entries[1].references.is_empty());
    }

    #[tokio::test]
    async fn test_reverse_processes_oldest_first() {
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/a/", EMPTY_PAGE)
            .with_page("http://www.tested.com/b/", EMPTY_PAGE);
        let entries = vec![
            entry("A", "http://www.tested.com/a/", None),
            entry("B", "http://www.tested.com/b/", None),
        ];

        let report = process_entries(&fetcher, entries, None, true).await;

        assert_eq!(report.entries[0].title, "B");
        assert_eq!(report.entries[1].title, "A");
    }

    #[tokio::test]
    async fn test_premium_entries_never_appear() {
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/a/", EMPTY_PAGE);
        let entries = vec![
            entry("A", "http://www.tested.com/a/", None),
            entry("P", "http://www.tested.com/premium/locked/", None),
        ];

        let report = process_entries(&fetcher, entries, None, false).await;

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].title, "A");
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_cutoff_is_strict() {
        let cutoff = Utc.with_ymd_and_hms(2014, 8, 5, 12, 0, 0).unwrap();
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/at/", EMPTY_PAGE)
            .with_page("http://www.tested.com/after/", EMPTY_PAGE);
        let entries = vec![
            entry(
                "Before",
                "http://www.tested.com/before/",
                Some(cutoff - chrono::Duration::seconds(1)),
            ),
            entry("At", "http://www.tested.com/at/", Some(cutoff)),
            entry(
                "After",
                "http://www.tested.com/after/",
                Some(cutoff + chrono::Duration::seconds(1)),
            ),
        ];

        let report = process_entries(&fetcher, entries, Some(cutoff), false).await;

        let titles: Vec<&str> = report.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["At", "After"]);
    }

    #[tokio::test]
    async fn test_end_to_end_plain_report() {
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/a/", VIDEO_PAGE)
            .with_page("http://www.tested.com/b/", EMPTY_PAGE);
        let entries = vec![
            entry("A", "http://www.tested.com/a/", None),
            entry("B", "http://www.tested.com/b/", None),
        ];

        let report = process_entries(&fetcher, entries, None, false).await;
        let out = crate::outputs::plain::render(&report, chrono::Local::now(), false, false);
        let separator = "-".repeat(80);

        assert!(out.contains(&format!("A\n  http://youtu.be/dQw4w9WgXcQ\n{separator}\n")));
        assert!(out.contains(&format!("B\n{separator}\n")));

        let secure = crate::outputs::plain::render(&report, chrono::Local::now(), true, false);
        assert!(secure.contains("  https://youtu.be/dQw4w9WgXcQ\n"));

        let hidden = crate::outputs::plain::render(&report, chrono::Local::now(), false, true);
        assert!(!hidden.contains("B\n"));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_partial_report() {
        let fetcher = MapFetcher::default()
            .with_page("http://www.tested.com/a/", VIDEO_PAGE);
        let entries = vec![
            entry("A", "http://www.tested.com/a/", None),
            entry("Gone", "http://www.tested.com/gone/", None),
        ];

        let report = process_entries(&fetcher, entries, None, false).await;

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].title, "A");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].title, "Gone");
    }
}
