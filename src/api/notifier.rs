//! Tray surface backed by the HTTP control server

use std::{path::PathBuf, sync::Arc};

use tokio::{
    net::TcpListener,
    sync::{oneshot, watch},
};
use tracing::{error, info, warn};

use crate::{
    error::ReminderError,
    state::SessionSnapshot,
    tasks::EventSender,
    ui::Notifier,
};

use super::{create_router, ControlState};

pub struct HttpNotifier {
    listener: Option<TcpListener>,
    state: Arc<ControlState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl HttpNotifier {
    /// `listener` is already bound; holding it is what keeps other instances out
    pub fn new(
        listener: TcpListener,
        events: EventSender,
        status: watch::Receiver<SessionSnapshot>,
        tray_icon: Option<PathBuf>,
    ) -> Self {
        Self {
            listener: Some(listener),
            state: Arc::new(ControlState::new(events, status).with_tray_icon(tray_icon)),
            shutdown: None,
        }
    }
}

impl Notifier for HttpNotifier {
    fn start(&mut self) -> Result<(), ReminderError> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| ReminderError::unavailable("control surface", "already started"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ReminderError::unavailable("control surface", e))?;

        if let Some(icon) = self.state.tray_icon() {
            if icon.is_file() {
                info!("Tray icon: {}", icon.display());
            } else {
                warn!("Tray icon not found: {}", icon.display());
            }
        }

        let app = create_router(Arc::clone(&self.state));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                error!("Control server error: {}", e);
            }
        });
        self.shutdown = Some(shutdown_tx);

        info!("Control surface running on http://{}", addr);
        info!("Endpoints:");
        info!("  POST /control/show     - Show control window");
        info!("  POST /settings/open    - Show settings");
        info!("  PUT  /settings         - Apply settings");
        info!("  POST /reminder/show    - Show reminder now");
        info!("  POST /reminder/dismiss - Dismiss reminder");
        info!("  POST /reminder/confirm - Answer quick-close prompt");
        info!("  POST /exit             - Exit");
        info!("  GET  /status           - Current status and next reminder");
        info!("  GET  /health           - Health check");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
            info!("Control surface stopping");
        }
    }

    fn update_tooltip(&mut self, tooltip: &str) {
        self.state.set_tooltip(tooltip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::events;

    #[tokio::test]
    async fn start_twice_is_unavailable_and_stop_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (sender, _rx) = events::channel();
        let (_status_tx, status_rx) = watch::channel(SessionSnapshot::default());
        let mut notifier = HttpNotifier::new(listener, sender, status_rx, None);

        notifier.start().unwrap();
        assert!(matches!(
            notifier.start(),
            Err(ReminderError::PlatformUnavailable { .. })
        ));

        notifier.update_tooltip("Desktop Reminder | waiting for next reminder");
        assert_eq!(notifier.state.tooltip(), "Desktop Reminder | waiting for next reminder");

        notifier.stop();
        notifier.stop();
    }
}
