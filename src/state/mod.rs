//! Timer state management
//!
//! The persisted deadline, the clock it is measured against, and the
//! controller that turns both into expiry and reset behaviour.

pub mod clock;
pub mod deadline;
pub mod timer;
pub mod timer_state;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use deadline::{DeadlineStore, StorageError};
pub use timer::{format_duration, TimerController};
pub use timer_state::{ExpiryOutcome, TimerPhase, TimerStatus};
