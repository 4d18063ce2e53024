//! File-system and process services
//!
//! Settings persistence, log retention, the PID marker and the
//! single-instance guard. None of these may stop the reminder cadence.

pub mod instance;
pub mod log_retention;
pub mod pid_file;
pub mod settings_store;

// Re-export main types
pub use log_retention::{LogFileEntry, LogRetentionPolicy};
pub use settings_store::{SavedSettings, SettingsStore};
