//! Driving loops
//!
//! Two independent ways of ticking the same timer controller.

pub mod cli_loop;
pub mod indicator;

use std::time::Duration;

/// Poll interval of the command-line loop
pub const CLI_TICK: Duration = Duration::from_secs(60);

/// Refresh interval of the indicator
pub const INDICATOR_TICK: Duration = Duration::from_secs(1);

// Re-export main functions
pub use cli_loop::cli_loop_task;
pub use indicator::{indicator_task, IndicatorSurface, TerminalIndicator};
