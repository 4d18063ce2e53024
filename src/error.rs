//! Error taxonomy shared by the reminder core

use std::path::PathBuf;
use thiserror::Error;

/// Invalid active-hours expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid segment '{0}', expected 'start-end'")]
    MissingSeparator(String),

    #[error("invalid segment '{0}', hours must be integers")]
    NotInteger(String),

    #[error("invalid segment '{0}', hours must be in 0-23")]
    OutOfRange(String),
}

/// A settings candidate was rejected; the current config is left untouched
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("interval_minutes must be > 0 (got {0})")]
    NonPositiveInterval(f64),

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("quick_close_confirm_text must not be empty")]
    EmptyQuickCloseText,

    #[error("active_hours: {0}")]
    ActiveHours(#[from] FormatError),
}

impl ValidationError {
    /// Name of the settings field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveInterval(_) => "interval_minutes",
            ValidationError::EmptyMessage => "message",
            ValidationError::EmptyQuickCloseText => "quick_close_confirm_text",
            ValidationError::ActiveHours(_) => "active_hours",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to {action} {}: {source}", path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{feature} is unavailable: {reason}")]
    PlatformUnavailable {
        feature: &'static str,
        reason: String,
    },
}

impl ReminderError {
    pub fn persistence(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ReminderError::Persistence {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn unavailable(feature: &'static str, reason: impl ToString) -> Self {
        ReminderError::PlatformUnavailable {
            feature,
            reason: reason.to_string(),
        }
    }
}
