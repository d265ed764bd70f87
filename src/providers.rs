//! Supported video provider registry.
//!
//! A provider is a token-matching pattern plus a URL template for turning the
//! extracted token back into a shareable playback link. The registry is built
//! once at startup and never mutated afterwards.
//!
//! # Ordering
//!
//! Registration order is significant: classification returns the FIRST
//! provider whose pattern matches, so an ambiguous embed URL resolves to the
//! earliest registered provider, not the best match.

use once_cell::sync::Lazy;
use regex::Regex;

/// A supported video provider.
///
/// # Fields
///
/// * `name` - Short identifier used in [`VideoReference`](crate::models::VideoReference)
/// * `pattern` - Regex searched (not anchored) against decoded embed URLs
/// * `group` - Capture group index that yields the video token
/// * `template` - Playback URL template with `{scheme}` and `{token}` slots
#[derive(Debug)]
pub struct Provider {
    /// Short provider identifier ("youtube", "vimeo").
    pub name: &'static str,
    /// Token-matching pattern, searched as a substring of the embed URL.
    pub pattern: Regex,
    /// Which capture group holds the token (0 = whole match).
    pub group: usize,
    /// Canonical playback URL template.
    pub template: &'static str,
}

impl Provider {
    /// Build the canonical playback URL for a token.
    ///
    /// `secure` selects `https` over `http` in the rendered URL.
    pub fn playback_url(&self, token: &str, secure: bool) -> String {
        let scheme = if secure { "https" } else { "http" };
        self.template
            .replace("{scheme}", scheme)
            .replace("{token}", token)
    }
}

/// The built-in providers, in registration order.
static PROVIDERS: Lazy<Vec<Provider>> = Lazy::new(|| {
    vec![
        Provider {
            name: "youtube",
            // YouTube video IDs are exactly 11 characters.
            pattern: Regex::new("[a-zA-Z0-9_-]{11}").unwrap(),
            group: 0,
            template: "{scheme}://youtu.be/{token}",
        },
        Provider {
            name: "vimeo",
            pattern: Regex::new(r"vimeo.+?/(\d+)").unwrap(),
            group: 1,
            template: "{scheme}://vimeo.com/{token}",
        },
    ]
});

/// All registered providers, in registration order.
pub fn all() -> &'static [Provider] {
    &PROVIDERS
}

/// Look up a provider by name.
pub fn lookup(name: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.name == name)
}
