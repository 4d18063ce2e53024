//! State management module
//!
//! Value types owned by the session controller: the reminder configuration,
//! active-hour windows, schedule state and the published session snapshot.

pub mod active_hours;
pub mod reminder_config;
pub mod schedule_state;
pub mod session_state;

// Re-export main types
pub use active_hours::{ActiveHourRange, ActiveHoursSpec};
pub use reminder_config::{ReminderConfig, SettingsCandidate};
pub use schedule_state::{ScheduleState, TimerHandle};
pub use session_state::{DismissOutcome, SessionPhase, SessionSnapshot};
