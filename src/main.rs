//! # tested_videos
//!
//! Lists video URLs embedded in stories on tested.com. The official RSS feed
//! is loaded (or a local copy of it), every story page is fetched, and the
//! video embeds on each page are resolved to canonical playback URLs
//! (YouTube, Vimeo). The result is a one-shot report on stdout.
//!
//! ## Usage
//!
//! ```sh
//! tested_videos
//! tested_videos --html --ssl
//! tested_videos --only-new --hide-empty
//! ```
//!
//! ## Architecture
//!
//! A small pipeline:
//! 1. **Feed**: fetch and parse the story feed into entries
//! 2. **Processing**: apply the skip rules, fetch each story page, extract
//!    video references from the embed markup
//! 3. **Output**: render the title → URLs report as text, HTML, or JSON
//!
//! The `--only-new` cutoff is kept in a `lastrun` side file that is
//! rewritten at the end of every run, successful or not.

use std::error::Error;

use chrono::{Local, Utc};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod classify;
mod cli;
mod extract;
mod feed;
mod fetch;
mod lastrun;
mod models;
mod outputs;
mod process;
mod providers;

use cli::Cli;
use fetch::HttpFetcher;
use lastrun::LASTRUN_FILE;
use models::Report;
use outputs::{html, json, plain};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // The progress line belongs to the plain text surface only.
    if !args.html && !args.json {
        println!("Loading feed...");
    }

    let cutoff = if args.only_new {
        lastrun::read_cutoff(LASTRUN_FILE).await
    } else {
        None
    };

    let outcome = run(&args, cutoff).await;

    // Record the run time whether or not the pipeline succeeded, so a failed
    // run still advances the only-new cutoff.
    if let Err(e) = lastrun::write_timestamp(LASTRUN_FILE, Utc::now()).await {
        warn!(error = %e, "Failed to write last-run file");
    }

    let report = outcome?;

    let generated_at = Local::now();
    let rendered = if args.html {
        html::render(&report, generated_at, args.ssl, args.hide_empty)
    } else if args.json {
        json::render(&report, generated_at, args.ssl, args.hide_empty)
    } else {
        plain::render(&report, generated_at, args.ssl, args.hide_empty)
    };
    print!("{rendered}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        stories = report.entries.len(),
        failures = report.failures.len(),
        "Execution complete"
    );

    Ok(())
}

/// Load the feed and process its entries into a report.
async fn run(args: &Cli, cutoff: Option<chrono::DateTime<Utc>>) -> Result<Report, Box<dyn Error>> {
    let entries = feed::load_feed(args.file.as_deref(), &args.feed_url).await?;
    let fetcher = HttpFetcher;
    Ok(process::process_entries(&fetcher, entries, cutoff, args.reverse).await)
}
