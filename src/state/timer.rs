//! Timer controller: expiry detection, cleanup, and reset

use chrono::{Duration, NaiveDateTime};
use tracing::{error, info, warn};

use super::{
    clock::{Clock, SystemClock},
    deadline::{format_timestamp, next_deadline, DeadlineStore, StorageError},
    timer_state::{ExpiryOutcome, TimerPhase, TimerStatus},
};
use crate::services::CleanupScript;

/// The single countdown timer.
///
/// Expiry is recomputed from the wall clock on every query. Driving loops
/// borrow the controller and use only its public operations.
#[derive(Debug)]
pub struct TimerController<C: Clock = SystemClock> {
    store: DeadlineStore,
    cleanup: CleanupScript,
    clock: C,
    deadline: NaiveDateTime,
}

impl<C: Clock> TimerController<C> {
    /// Load the persisted deadline, rearming if the record is missing or unreadable
    pub fn open(store: DeadlineStore, cleanup: CleanupScript, clock: C) -> Self {
        let deadline = store.load_or_rearm(clock.now());
        Self {
            store,
            cleanup,
            clock,
            deadline,
        }
    }

    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    pub fn store(&self) -> &DeadlineStore {
        &self.store
    }

    pub fn cleanup(&self) -> &CleanupScript {
        &self.cleanup
    }

    /// Start a fresh 12-hour window from now.
    ///
    /// The in-memory deadline always advances; an error only means the new
    /// deadline did not reach disk.
    pub fn reset(&mut self) -> Result<NaiveDateTime, StorageError> {
        self.deadline = next_deadline(self.clock.now());
        info!("Timer reset, new deadline: {}", format_timestamp(self.deadline));
        self.store.save(self.deadline)?;
        Ok(self.deadline)
    }

    /// Time left until the deadline; zero or negative once expired.
    pub fn remaining(&self) -> Duration {
        self.deadline - self.clock.now()
    }

    pub fn phase(&self) -> TimerPhase {
        if self.remaining() > Duration::zero() {
            TimerPhase::Armed
        } else {
            TimerPhase::Expired
        }
    }

    /// Remaining time as `HH:MM:SS`
    pub fn label(&self) -> String {
        format_duration(self.remaining())
    }

    /// Run the cleanup script if the deadline has passed.
    ///
    /// Returns `true` when nothing was due or the script succeeded. Does not
    /// rearm the timer; callers follow up with [`reset`](Self::reset).
    pub async fn check_and_cleanup_if_expired(&self) -> bool {
        if self.phase().is_armed() {
            return true;
        }

        info!("Timer expired, running cleanup");
        match self.cleanup.run().await {
            Ok(report) => {
                info!("Cleanup completed in {:.1}s", report.elapsed.as_secs_f64());
                true
            }
            Err(e) => {
                warn!("Cleanup failed: {}", e);
                false
            }
        }
    }

    /// Clean up after an observed expiry, then rearm no matter how cleanup went.
    pub async fn handle_expiry(&mut self) -> ExpiryOutcome {
        let cleanup_succeeded = self.check_and_cleanup_if_expired().await;

        let persisted = match self.reset() {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to persist new deadline: {}", e);
                false
            }
        };

        ExpiryOutcome {
            cleanup_succeeded,
            new_deadline: self.deadline,
            persisted,
        }
    }

    /// Snapshot for status reporting
    pub fn status(&self) -> TimerStatus {
        let remaining = self.remaining();
        TimerStatus {
            end_time: self.deadline,
            remaining_seconds: remaining.num_seconds().max(0) as u64,
            remaining: format_duration(remaining),
            phase: self.phase(),
            data_file: self.store.path().to_path_buf(),
        }
    }
}

/// Render a duration as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24. Anything not strictly positive renders as
/// `00:00:00`.
pub fn format_duration(duration: Duration) -> String {
    if duration <= Duration::zero() {
        return "00:00:00".to_string();
    }
    let total = duration.num_seconds();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
