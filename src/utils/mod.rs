//! Utility functions module
//!
//! Shutdown signal plumbing for the driving loops.

pub mod signals;

// Re-export main functions
pub use signals::{shutdown_channel, shutdown_signal};
