//! External collaborators
//!
//! The cleanup script run on expiry and the presentation capability check.

pub mod cleanup;
pub mod display;

// Re-export main types
pub use cleanup::{CleanupError, CleanupReport, CleanupScript};
pub use display::{detect_capability, DisplayCapability};
