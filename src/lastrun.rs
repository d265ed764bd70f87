//! Last-run timestamp bookkeeping for `--only-new`.
//!
//! A side file holds one RFC 3339 timestamp: when the tool last ran. It is
//! read at startup to form the only-new cutoff and rewritten with the
//! current time at the end of every run, whether or not the run succeeded,
//! so a partial run still advances the cutoff.

use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Where the last-run timestamp is kept, relative to the working directory.
pub const LASTRUN_FILE: &str = "lastrun";

/// Read the only-new cutoff from the last-run file.
///
/// A missing file means no cutoff (every entry is new). A corrupt or
/// unreadable file is deleted and likewise treated as absent.
pub async fn read_cutoff(path: &str) -> Option<DateTime<Utc>> {
    if !Path::new(path).is_file() {
        return None;
    }

    let parsed = match tokio::fs::read_to_string(path).await {
        Ok(contents) => DateTime::parse_from_rfc3339(contents.trim())
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match parsed {
        Ok(cutoff) => {
            info!(%cutoff, "Loaded last-run cutoff");
            Some(cutoff)
        }
        Err(error) => {
            warn!(path, %error, "Last-run file unreadable; deleting it");
            let _ = tokio::fs::remove_file(path).await;
            None
        }
    }
}

/// Overwrite the last-run file with `now`.
pub async fn write_timestamp(path: &str, now: DateTime<Utc>) -> Result<(), Box<dyn Error>> {
    tokio::fs::write(path, now.to_rfc3339()).await?;
    info!(path, "Recorded run timestamp");
    Ok(())
}
