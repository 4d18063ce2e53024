//! Utility functions module
//!
//! Logging setup, signal handling and the clock abstraction.

pub mod clock;
pub mod logging;
pub mod signals;

// Re-export main functions
pub use clock::{Clock, SystemClock};
pub use signals::{forward_shutdown, shutdown_signal};
