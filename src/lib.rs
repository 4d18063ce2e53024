//! Desktop Reminder - periodic break reminders gated by active hours
//!
//! The session controller owns all state and is driven from a single event
//! queue. The timer, the reminder window, the tray stand-in (an HTTP control
//! surface) and the clock sit behind traits so the controller can be tested
//! without any of them.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::{create_router, HttpNotifier};
pub use config::Config;
pub use error::{FormatError, ReminderError, ValidationError};
pub use state::{ActiveHoursSpec, ReminderConfig, SessionSnapshot};
pub use tasks::{run_session, ReminderSessionController};
pub use utils::signals::shutdown_signal;
