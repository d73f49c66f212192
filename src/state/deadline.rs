//! Durable storage of the timer deadline
//!
//! The deadline lives in a small JSON record (`{"end_time": "..."}`) so more
//! keys can be added later without breaking older files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{Duration, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Hours added to "now" whenever the timer is rearmed
pub const FIXED_INTERVAL_HOURS: i64 = 12;

/// Timestamp layout written to disk: ISO-8601 with microseconds
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The fixed rearm interval as a duration
pub fn fixed_interval() -> Duration {
    Duration::hours(FIXED_INTERVAL_HOURS)
}

/// Deadline produced by a reset at `now`, truncated to the precision the
/// record keeps on disk.
pub fn next_deadline(now: NaiveDateTime) -> NaiveDateTime {
    (now + fixed_interval()).trunc_subsecs(6)
}

/// Render a deadline the way it is stored
pub fn format_timestamp(deadline: NaiveDateTime) -> String {
    deadline.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; the fractional part is optional.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, StorageError> {
    value
        .trim()
        .parse::<NaiveDateTime>()
        .map_err(|source| StorageError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Errors raised while reading or writing the deadline record
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access deadline file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed deadline record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid end_time timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

impl StorageError {
    /// True when the record simply has not been written yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// On-disk shape of the deadline record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeadlineRecord {
    end_time: String,
}

/// File-backed store for the single deadline record
#[derive(Debug, Clone)]
pub struct DeadlineStore {
    path: PathBuf,
}

impl DeadlineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored deadline, failing on any problem with the file.
    pub fn read(&self) -> Result<NaiveDateTime, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        let record: DeadlineRecord = serde_json::from_str(&raw)?;
        parse_timestamp(&record.end_time)
    }

    /// Replace the stored record with `deadline`.
    pub fn save(&self, deadline: NaiveDateTime) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let record = DeadlineRecord {
            end_time: format_timestamp(deadline),
        };
        let body = serde_json::to_string(&record)?;

        fs::write(&self.path, body).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved deadline {} to {}", record.end_time, self.path.display());
        Ok(())
    }

    /// Load the stored deadline, or rearm to `now + 12h` if it cannot be read.
    ///
    /// Never fails: a fresh deadline is persisted on a best-effort basis and
    /// returned even if that write fails.
    pub fn load_or_rearm(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.read() {
            Ok(deadline) => {
                debug!("Loaded deadline {} from {}", format_timestamp(deadline), self.path.display());
                deadline
            }
            Err(e) => {
                if e.is_not_found() {
                    debug!("No deadline file at {}, starting a new countdown", self.path.display());
                } else {
                    warn!("Unreadable deadline file, starting a new countdown: {}", e);
                }

                let deadline = next_deadline(now);
                if let Err(e) = self.save(deadline) {
                    warn!("Failed to persist fresh deadline: {}", e);
                }
                info!("New deadline: {}", format_timestamp(deadline));
                deadline
            }
        }
    }
}
