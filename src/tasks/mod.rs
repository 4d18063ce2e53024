//! Session tasks module
//!
//! The event queue, the reminder scheduler, the session controller and the
//! loop that drives the controller from the queue.

pub mod events;
pub mod scheduler;
pub mod session;

use tokio::sync::mpsc;
use tracing::info;

// Re-export main types
pub use events::{EventSender, SessionEvent};
pub use scheduler::{FireOutcome, ReminderScheduler, TimerDriver, TokioTimer};
pub use session::{Collaborators, LoopControl, ReminderSessionController, SessionOptions};

/// Start the session and process events until it shuts down.
///
/// All controller mutation happens here, on the task that owns it.
pub async fn run_session(
    mut controller: ReminderSessionController,
    mut events: mpsc::Receiver<SessionEvent>,
) {
    controller.start();

    while let Some(event) = events.recv().await {
        if controller.handle_event(event) == LoopControl::Exit {
            break;
        }
    }

    controller.quit();
    info!("Session loop finished");
}
