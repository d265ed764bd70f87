//! Command-line interface definitions.
//!
//! All options are optional; with no flags the tool fetches the official
//! feed and prints a plain text report of every story.

use clap::Parser;

use crate::feed::DEFAULT_FEED_URL;

/// List video URLs in stories on tested.com.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// HTML output instead of plain text
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// JSON output instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Load the feed from a file instead of from the Internet
    #[arg(long)]
    pub file: Option<String>,

    /// Feed URL to fetch when no file is given
    #[arg(long, env = "TESTED_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Hide stories without videos
    #[arg(long)]
    pub hide_empty: bool,

    /// Use HTTPS for the video URLs
    #[arg(long)]
    pub ssl: bool,

    /// Display the stories in reversed order
    #[arg(long)]
    pub reverse: bool,

    /// Only display stories which were published since the last invocation
    #[arg(long)]
    pub only_new: bool,
}
