//! Collaborator interfaces driven by the session controller
//!
//! The controller never renders anything itself. It tells a [`ReminderUi`]
//! what to show and keeps a [`Notifier`] (tray-like surface) informed.

pub mod console;

use serde::Serialize;
use tracing::debug;

use crate::{error::ReminderError, state::ReminderConfig};

pub use console::ConsoleUi;

/// Maximum tooltip length accepted by tray surfaces
pub const TOOLTIP_MAX_CHARS: usize = 127;

/// What a reminder popup displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderView {
    pub title: String,
    pub message: String,
    pub width: u32,
    pub height: u32,
}

impl From<&ReminderConfig> for ReminderView {
    fn from(config: &ReminderConfig) -> Self {
        Self {
            title: config.title.clone(),
            message: config.message.clone(),
            width: config.window_width,
            height: config.window_height,
        }
    }
}

/// Rendering side of the reminder
pub trait ReminderUi: Send {
    /// Open a new topmost reminder
    fn show_reminder(&mut self, view: &ReminderView);

    /// Bring the already-open reminder to the front
    fn focus_reminder(&mut self);

    fn close_reminder(&mut self);

    /// Ask the user whether a reminder dismissed early should really close.
    /// The answer comes back later as a `QuickCloseAnswer` event.
    fn ask_quick_close(&mut self, prompt: &str);

    fn open_settings(&mut self, config: &ReminderConfig);

    fn show_control(&mut self, summary: &str);
}

/// Tray-like surface: lifecycle plus a tooltip. Inbound events are posted
/// to the session queue by the implementation itself.
pub trait Notifier: Send {
    fn start(&mut self) -> Result<(), ReminderError>;

    fn stop(&mut self);

    fn update_tooltip(&mut self, tooltip: &str);
}

/// Used when no control surface is available
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn start(&mut self) -> Result<(), ReminderError> {
        debug!("No control surface configured");
        Ok(())
    }

    fn stop(&mut self) {}

    fn update_tooltip(&mut self, tooltip: &str) {
        debug!("Tooltip: {}", tooltip);
    }
}

/// Clip to what tray surfaces accept
pub fn clip_tooltip(tooltip: &str) -> String {
    tooltip.chars().take(TOOLTIP_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_is_clipped_by_characters() {
        let long = "é".repeat(200);
        assert_eq!(clip_tooltip(&long).chars().count(), TOOLTIP_MAX_CHARS);
        assert_eq!(clip_tooltip("short"), "short");
    }

    #[test]
    fn view_copies_cosmetic_fields() {
        let config = ReminderConfig::default();
        let view = ReminderView::from(&config);
        assert_eq!(view.title, config.title);
        assert_eq!(view.width, 320);
        assert_eq!(view.height, 140);
    }
}
