//! Derived timer phase and status snapshot

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use super::deadline::format_timestamp;

/// Phase of the countdown relative to the wall clock. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Armed,
    Expired,
}

impl TimerPhase {
    /// Check if the timer is still counting down
    pub fn is_armed(&self) -> bool {
        matches!(self, TimerPhase::Armed)
    }
}

/// Point-in-time view of the timer for status output
#[derive(Debug, Clone, Serialize)]
pub struct TimerStatus {
    #[serde(serialize_with = "serialize_timestamp")]
    pub end_time: NaiveDateTime,
    pub remaining_seconds: u64,
    pub remaining: String,
    pub phase: TimerPhase,
    pub data_file: PathBuf,
}

fn serialize_timestamp<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(*value))
}

/// What happened while handling one observed expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryOutcome {
    /// Whether the cleanup script reported success
    pub cleanup_succeeded: bool,
    /// The rearmed deadline
    pub new_deadline: NaiveDateTime,
    /// Whether the rearmed deadline reached disk
    pub persisted: bool,
}
