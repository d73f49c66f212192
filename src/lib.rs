//! Cleanup Timer - a persistent 12-hour countdown that runs a cleanup script
//!
//! The deadline survives restarts in a small JSON file. When it passes, the
//! cleanup script runs and the countdown rearms itself.

pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Mode};
pub use services::{CleanupScript, DisplayCapability};
pub use state::{DeadlineStore, TimerController};
pub use utils::signals::shutdown_channel;
