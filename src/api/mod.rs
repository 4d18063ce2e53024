//! HTTP control surface
//!
//! Local endpoints standing in for the tray icon: they post events to the
//! session queue and read the published session snapshot.

pub mod handlers;
pub mod notifier;
pub mod responses;

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Instant,
};

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::{state::SessionSnapshot, tasks::EventSender};
use handlers::*;

pub use notifier::HttpNotifier;

/// Shared state behind the control endpoints
#[derive(Debug)]
pub struct ControlState {
    pub events: EventSender,
    pub status: watch::Receiver<SessionSnapshot>,
    tooltip: Mutex<String>,
    tray_icon: Option<PathBuf>,
    start_time: Instant,
}

impl ControlState {
    pub fn new(events: EventSender, status: watch::Receiver<SessionSnapshot>) -> Self {
        Self {
            events,
            status,
            tooltip: Mutex::new("Desktop Reminder".to_string()),
            tray_icon: None,
            start_time: Instant::now(),
        }
    }

    pub fn with_tray_icon(mut self, tray_icon: Option<PathBuf>) -> Self {
        self.tray_icon = tray_icon;
        self
    }

    pub fn tray_icon(&self) -> Option<&Path> {
        self.tray_icon.as_deref()
    }

    pub fn tooltip(&self) -> String {
        self.tooltip
            .lock()
            .map(|tooltip| tooltip.clone())
            .unwrap_or_default()
    }

    pub fn set_tooltip(&self, tooltip: &str) {
        if let Ok(mut current) = self.tooltip.lock() {
            *current = tooltip.to_string();
        }
    }

    /// Calculate uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<ControlState>) -> Router {
    Router::new()
        .route("/control/show", post(show_control_handler))
        .route("/settings/open", post(open_settings_handler))
        .route("/settings", put(apply_settings_handler))
        .route("/reminder/show", post(show_reminder_handler))
        .route("/reminder/dismiss", post(dismiss_handler))
        .route("/reminder/confirm", post(confirm_handler))
        .route("/exit", post(exit_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
