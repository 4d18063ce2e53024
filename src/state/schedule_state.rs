//! Schedule state: when the next reminder is due and which timer is pending

use chrono::{DateTime, Local};
use serde::Serialize;

/// Opaque identity of one armed single-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Schedule state for the reminder countdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleState {
    pub next_fire_at: Option<DateTime<Local>>,
    pub pending_timer: Option<TimerHandle>,
}

impl ScheduleState {
    /// Create an empty schedule (nothing armed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an armed schedule
    pub fn armed(next_fire_at: DateTime<Local>, handle: TimerHandle) -> Self {
        Self {
            next_fire_at: Some(next_fire_at),
            pending_timer: Some(handle),
        }
    }

    /// Check if a timer is pending
    pub fn is_armed(&self) -> bool {
        self.pending_timer.is_some()
    }

    /// Whether `handle` is the timer currently pending
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending_timer == Some(handle)
    }

    /// Seconds left until the next fire, if one is armed
    pub fn remaining_seconds(&self, now: DateTime<Local>) -> Option<u64> {
        if !self.is_armed() {
            return None;
        }
        self.next_fire_at
            .map(|at| (at - now).num_seconds().max(0) as u64)
    }
}
