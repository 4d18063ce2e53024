//! Session lifecycle and the published status snapshot

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// `Idle -> Armed -> (Firing | Skipped) -> Armed -> ... -> Shutdown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Armed,
    Firing,
    Skipped,
    Shutdown,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Shutdown)
    }
}

/// What happened to the open reminder after a dismiss request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DismissOutcome {
    Closed,
    Kept,
    ConfirmRequired { prompt: String },
    NotOpen,
}

/// Read-only view of the session, published after every transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub next_reminder_at: Option<DateTime<Local>>,
    pub reminder_open: bool,
    pub awaiting_confirmation: bool,
    pub interval_minutes: f64,
    pub active_hours: String,
    pub message: String,
    pub last_fire_skipped: Option<bool>,
    pub status_line: String,
}
