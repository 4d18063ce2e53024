//! Signal handling for graceful shutdown

use tracing::{info, warn};

use crate::{
    error::ReminderError,
    tasks::{EventSender, SessionEvent},
};

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
pub async fn shutdown_signal() -> Result<(), ReminderError> {
    use futures::stream::StreamExt;
    use signal_hook_tokio::Signals;

    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .map_err(|e| ReminderError::unavailable("signal handling", e))?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Wait for Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() -> Result<(), ReminderError> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| ReminderError::unavailable("signal handling", e))?;
    info!("Received Ctrl+C");
    Ok(())
}

/// Turn the first shutdown signal into a `Quit` event
pub async fn forward_shutdown(events: EventSender) {
    match shutdown_signal().await {
        Ok(()) => forward_quit(&events).await,
        Err(e) => warn!("{}", e),
    }
}

/// `Quit` waits for room in the queue; a signal is never dropped
async fn forward_quit(events: &EventSender) {
    if !events.deliver(SessionEvent::Quit).await {
        warn!("Session already ended before shutdown signal was handled");
    }
}
