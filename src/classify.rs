//! Embed URL classification.
//!
//! Takes the raw `src` of an embedded player, decodes it, and matches it
//! against the provider registry to pull out the video token.

use tracing::debug;

use crate::models::VideoReference;
use crate::providers;

/// Try to get a video reference from an embed URL.
///
/// The URL is percent-decoded first (source pages frequently pre-encode the
/// embed target), then each registered provider's pattern is run as a
/// substring search in registration order. The first match wins.
///
/// # Returns
///
/// `Some(VideoReference)` for the first matching provider, or `None` when no
/// provider matches. Unsupported embed types are expected and not an error.
pub fn classify(raw_url: &str) -> Option<VideoReference> {
    let url = decode_embed_url(raw_url);

    for provider in providers::all() {
        if let Some(caps) = provider.pattern.captures(&url) {
            if let Some(token) = caps.get(provider.group) {
                debug!(provider = provider.name, token = token.as_str(), %url, "Classified embed URL");
                return Some(VideoReference::new(provider.name, token.as_str()));
            }
        }
    }

    debug!(%url, "Embed URL matched no provider");
    None
}

/// Percent-decode an embed URL using legacy form-encoding rules.
///
/// `+` decodes to a space, matching how the source pages encode embed
/// targets. Undecodable input is returned as-is.
fn decode_embed_url(raw: &str) -> String {
    let plussed = raw.replace('+', " ");
    match urlencoding::decode(&plussed) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plussed,
    }
}
