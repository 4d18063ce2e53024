//! Reminder countdown: single rearm entry point, fire gating by active hours

use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use tokio::{
    task::AbortHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::state::{ActiveHoursSpec, ScheduleState, TimerHandle};

use super::events::{EventSender, SessionEvent};

/// Delays beyond this are clamped; keeps wall-clock arithmetic in range
const MAX_DELAY: Duration = Duration::from_secs(366 * 24 * 60 * 60);

/// Source of single-shot timers
pub trait TimerDriver: Send {
    /// Start a timer that reports `TimerFired(handle)` after `delay`
    fn arm(&mut self, delay: Duration) -> TimerHandle;

    /// Make sure `handle` never fires
    fn cancel(&mut self, handle: TimerHandle);
}

/// Timers backed by tokio tasks posting into the session queue
pub struct TokioTimer {
    events: EventSender,
    next_id: u64,
    pending: Option<(TimerHandle, AbortHandle)>,
}

impl TokioTimer {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            next_id: 0,
            pending: None,
        }
    }
}

impl TimerDriver for TokioTimer {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let events = self.events.clone();
        let deadline = Instant::now() + delay;

        let task = tokio::spawn(async move {
            sleep_until(deadline).await;
            events.deliver(SessionEvent::TimerFired(handle)).await;
        });

        if let Some((_, previous)) = self.pending.replace((handle, task.abort_handle())) {
            previous.abort();
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            if let Some((_, task)) = self.pending.take() {
                task.abort();
            }
        }
    }
}

/// Result of a timer elapsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Inside active hours: show the reminder
    Show,
    /// Outside active hours: nothing shown this cycle
    Skipped,
    /// Not the pending timer (superseded by a later arm); ignored
    Stale,
}

pub struct ReminderScheduler {
    driver: Box<dyn TimerDriver>,
    interval_minutes: f64,
    state: ScheduleState,
}

impl ReminderScheduler {
    pub fn new(driver: Box<dyn TimerDriver>, interval_minutes: f64) -> Self {
        Self {
            driver,
            interval_minutes,
            state: ScheduleState::new(),
        }
    }

    /// Cancel whatever is pending and start a fresh countdown from `now`.
    ///
    /// This is the only place a timer gets armed.
    pub fn arm(&mut self, now: DateTime<Local>, interval_minutes: f64) -> DateTime<Local> {
        self.cancel();
        self.interval_minutes = interval_minutes;

        let delay = interval_delay(interval_minutes);
        let next_fire_at = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(now);

        let handle = self.driver.arm(delay);
        self.state = ScheduleState::armed(next_fire_at, handle);
        debug!("Armed timer {} for {:?}", handle.id(), delay);
        next_fire_at
    }

    /// Handle an elapsed timer. Re-arms for the next cycle whatever the gating says.
    pub fn on_fire(
        &mut self,
        handle: TimerHandle,
        now: DateTime<Local>,
        active_hours: &ActiveHoursSpec,
    ) -> FireOutcome {
        if !self.state.is_pending(handle) {
            debug!("Ignoring stale timer {}", handle.id());
            return FireOutcome::Stale;
        }
        self.state.pending_timer = None;

        let outcome = if active_hours.is_active(now.hour()) {
            FireOutcome::Show
        } else {
            info!(
                "Reminder skipped because current time is outside active hours ({})",
                active_hours.summary()
            );
            FireOutcome::Skipped
        };

        self.arm(now, self.interval_minutes);
        outcome
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.state.pending_timer.take() {
            self.driver.cancel(handle);
            debug!("Cancelled timer {}", handle.id());
        }
    }

    /// Stop the countdown entirely
    pub fn disarm(&mut self) {
        self.cancel();
        self.state.next_fire_at = None;
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn next_fire_at(&self) -> Option<DateTime<Local>> {
        self.state.next_fire_at
    }

    pub fn interval_minutes(&self) -> f64 {
        self.interval_minutes
    }
}

/// Minutes to a timer delay, truncated to whole milliseconds
pub fn interval_delay(interval_minutes: f64) -> Duration {
    let millis = (interval_minutes * 60_000.0).max(0.0) as u64;
    Duration::from_millis(millis).min(MAX_DELAY)
}
