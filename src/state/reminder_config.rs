//! Reminder configuration and the settings-apply validation

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::ActiveHoursSpec;

pub const DEFAULT_INTERVAL_MINUTES: f64 = 25.0;
pub const DEFAULT_MESSAGE: &str = "Time to take a break";
pub const DEFAULT_QUICK_CLOSE_CONFIRM_TEXT: &str = "Really close without resting your eyes?";
pub const DEFAULT_ACTIVE_HOURS: &str = "9-12/13-18";
pub const DEFAULT_TITLE: &str = "Reminder";
pub const DEFAULT_WINDOW_WIDTH: u32 = 320;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 140;

/// The live reminder configuration, owned by the session controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderConfig {
    pub interval_minutes: f64,
    pub message: String,
    pub quick_close_confirm_text: String,
    pub active_hours: ActiveHoursSpec,
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl ReminderConfig {
    /// One-line summary used in log lines and the control window
    pub fn summary(&self) -> String {
        let mut preview = self.message.trim().replace('\n', " ");
        if preview.chars().count() > 32 {
            preview = preview.chars().take(32).collect::<String>() + "...";
        }
        format!(
            "every {} minutes, active hours {}, message: {}",
            format_minutes(self.interval_minutes),
            self.active_hours.summary(),
            preview
        )
    }

    /// Validate `candidate` as a whole and swap it in only if every field passes
    pub fn apply(&mut self, candidate: &SettingsCandidate) -> Result<(), ValidationError> {
        let validated = candidate.validate()?;
        self.interval_minutes = validated.interval_minutes;
        self.message = validated.message;
        self.quick_close_confirm_text = validated.quick_close_confirm_text;
        self.active_hours = validated.active_hours;
        Ok(())
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            message: DEFAULT_MESSAGE.to_string(),
            quick_close_confirm_text: DEFAULT_QUICK_CLOSE_CONFIRM_TEXT.to_string(),
            active_hours: ActiveHoursSpec::parse(DEFAULT_ACTIVE_HOURS).unwrap_or_default(),
            title: DEFAULT_TITLE.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// User-editable fields as they arrive from the settings surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsCandidate {
    pub interval_minutes: f64,
    pub message: String,
    pub quick_close_confirm_text: String,
    /// Empty means all day; the key itself is required
    pub active_hours: String,
}

struct ValidatedSettings {
    interval_minutes: f64,
    message: String,
    quick_close_confirm_text: String,
    active_hours: ActiveHoursSpec,
}

impl SettingsCandidate {
    fn validate(&self) -> Result<ValidatedSettings, ValidationError> {
        if !(self.interval_minutes.is_finite() && self.interval_minutes > 0.0) {
            return Err(ValidationError::NonPositiveInterval(self.interval_minutes));
        }

        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let quick_close_confirm_text = self.quick_close_confirm_text.trim();
        if quick_close_confirm_text.is_empty() {
            return Err(ValidationError::EmptyQuickCloseText);
        }

        let active_hours = ActiveHoursSpec::parse(&self.active_hours)?;

        Ok(ValidatedSettings {
            interval_minutes: self.interval_minutes,
            message: message.to_string(),
            quick_close_confirm_text: quick_close_confirm_text.to_string(),
            active_hours,
        })
    }
}

/// `25` rather than `25.0`, `2.5` stays as is
pub fn format_minutes(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
