//! Session event queue: the only path from other threads into the session

use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};
use tracing::{debug, warn};

use crate::{
    error::ValidationError,
    state::{DismissOutcome, SettingsCandidate, TimerHandle},
};

pub const EVENT_QUEUE_CAPACITY: usize = 64;

pub type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum SessionEvent {
    /// Tray "show": bring up the control window
    ShowControl,
    /// Tray "settings"
    OpenSettings,
    /// Show the reminder now, or focus it if already open
    ShowReminder,
    ApplySettings {
        candidate: SettingsCandidate,
        reply: Reply<Result<(), ValidationError>>,
    },
    DismissReminder {
        reply: Reply<DismissOutcome>,
    },
    QuickCloseAnswer {
        close: bool,
        reply: Reply<DismissOutcome>,
    },
    TimerFired(TimerHandle),
    /// Tray "exit" or a termination signal
    Quit,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ShowControl => "show_control",
            SessionEvent::OpenSettings => "open_settings",
            SessionEvent::ShowReminder => "show_reminder",
            SessionEvent::ApplySettings { .. } => "apply_settings",
            SessionEvent::DismissReminder { .. } => "dismiss_reminder",
            SessionEvent::QuickCloseAnswer { .. } => "quick_close_answer",
            SessionEvent::TimerFired(_) => "timer_fired",
            SessionEvent::Quit => "quit",
        }
    }
}

/// Producer half of the queue. `post` never blocks; `deliver` waits for room.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<SessionEvent>,
}

impl EventSender {
    /// Enqueue `event`; returns false if it was dropped
    pub fn post(&self, event: SessionEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!("Event queue full, dropping {}", event.name());
                false
            }
            Err(TrySendError::Closed(event)) => {
                debug!("Session has ended, dropping {}", event.name());
                false
            }
        }
    }

    /// Enqueue `event`, waiting while the queue is full.
    ///
    /// For producers inside the session core (timers, signals) whose events
    /// must not be lost. Returns false only once the session has ended.
    pub async fn deliver(&self, event: SessionEvent) -> bool {
        match self.tx.send(event).await {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                debug!("Session has ended, dropping {}", event.name());
                false
            }
        }
    }
}

/// Create the session queue
pub fn channel() -> (EventSender, mpsc::Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    (EventSender { tx }, rx)
}
