//! Video reference extraction from story pages.
//!
//! Stories embed their videos inside `div.embed-type-video` containers. Two
//! embed styles exist side by side and both are checked for every page:
//!
//! 1. **iframe embeds**: an `iframe` whose `src` points at the provider's
//!    player. The `src` goes through the URL classifier.
//! 2. **YouTube iframe-API embeds**: a bare `div` the player is attached to
//!    from JavaScript. The video ID sits in the element's `id`
//!    (`player-<id>`) or in a `data-video-id` attribute, so no URL is
//!    involved at all.
//!
//! Results keep document order and duplicates; the same video embedded twice
//! yields two references.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::models::VideoReference;

static IFRAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.embed-type-video iframe").unwrap());
static DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.embed-type-video div").unwrap());

/// Matches the element id the YouTube iframe API embeds use.
static PLAYER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new("^player-([a-zA-Z0-9_-]{11})").unwrap());

/// Extract all video references from a parsed story page.
///
/// Runs both embed strategies and concatenates their results in document
/// order. Elements that match neither a known provider nor the iframe-API
/// shape are skipped silently; a malformed iframe-API embed (a classed div
/// without a usable `data-video-id`) is skipped with a warning.
pub fn extract_references(document: &Html) -> Vec<VideoReference> {
    let mut references = Vec::new();

    for element in document.select(&IFRAME_SELECTOR) {
        if let Some(src) = element.value().attr("src") {
            if let Some(vref) = classify(src) {
                references.push(vref);
            }
        }
    }

    for element in document.select(&DIV_SELECTOR) {
        // An empty id attribute counts as absent; the class branch still applies.
        if let Some(id) = element.value().attr("id").filter(|i| !i.is_empty()) {
            if let Some(caps) = PLAYER_ID.captures(id) {
                references.push(VideoReference::new("youtube", &caps[1]));
            }
        } else if element
            .value()
            .attr("class")
            .is_some_and(|c| !c.is_empty())
        {
            // iframe-API embed carrying the video ID in a data attribute.
            match element.value().attr("data-video-id") {
                Some(token) if !token.is_empty() => {
                    references.push(VideoReference::new("youtube", token));
                }
                _ => {
                    warn!("Video embed div without data-video-id; skipping");
                }
            }
        }
    }

    debug!(count = references.len(), "Extracted video references");
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn test_iframe_embed() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(refs, vec![VideoReference::new("youtube", "dQw4w9WgXcQ")]);
    }

    #[test]
    fn test_iframe_vimeo_embed() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <iframe src="http://player.vimeo.com/video/123456"></iframe>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(refs, vec![VideoReference::new("vimeo", "123456")]);
    }

    #[test]
    fn test_api_div_with_player_id() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <div id="player-AbCdEf12345"></div>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(refs, vec![VideoReference::new("youtube", "AbCdEf12345")]);
    }

    #[test]
    fn test_api_div_with_data_video_id() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <div class="yt-player" data-video-id="AbCdEf12345"></div>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(refs, vec![VideoReference::new("youtube", "AbCdEf12345")]);
    }

    #[test]
    fn test_api_div_empty_id_falls_through_to_class() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <div id="" class="yt-player" data-video-id="AbCdEf12345"></div>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(refs, vec![VideoReference::new("youtube", "AbCdEf12345")]);
    }

    #[test]
    fn test_api_div_missing_data_video_id_is_skipped() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <div class="yt-player"></div>
               </div>"#,
        );
        assert!(extract_references(&doc).is_empty());
    }

    #[test]
    fn test_iframe_outside_embed_container_ignored() {
        let doc = page(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#);
        assert!(extract_references(&doc).is_empty());
    }

    #[test]
    fn test_duplicates_preserved_in_document_order() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <iframe src="http://player.vimeo.com/video/123456"></iframe>
                 <iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>
                 <iframe src="http://player.vimeo.com/video/123456"></iframe>
               </div>"#,
        );
        let refs = extract_references(&doc);
        assert_eq!(
            refs,
            vec![
                VideoReference::new("vimeo", "123456"),
                VideoReference::new("youtube", "dQw4w9WgXcQ"),
                VideoReference::new("vimeo", "123456"),
            ]
        );
    }

    #[test]
    fn test_extraction_is_stable() {
        let doc = page(
            r#"<div class="embed-type-video">
                 <iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>
                 <div id="player-AbCdEf12345"></div>
               </div>"#,
        );
        assert_eq!(extract_references(&doc), extract_references(&doc));
    }
}
