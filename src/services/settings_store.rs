//! JSON settings file: tolerant load, sparse-overlay save

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    error::ReminderError,
    state::{
        reminder_config::{
            DEFAULT_ACTIVE_HOURS, DEFAULT_INTERVAL_MINUTES, DEFAULT_MESSAGE,
            DEFAULT_QUICK_CLOSE_CONFIRM_TEXT,
        },
        ActiveHoursSpec, ReminderConfig,
    },
};

pub const SETTINGS_FILE_NAME: &str = "desktop_reminder_settings.json";

const KEY_INTERVAL: &str = "interval_minutes";
const KEY_MESSAGE: &str = "message";
const KEY_QUICK_CLOSE: &str = "quick_close_confirm_text";
const KEY_ACTIVE_HOURS: &str = "active_hours";
const KEY_ACTIVE_HOURS_LEGACY: &str = "active_hours_text";

/// Values recovered from the settings file, each falling back to its default
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSettings {
    pub interval_minutes: f64,
    pub message: String,
    pub quick_close_confirm_text: String,
    pub active_hours: ActiveHoursSpec,
}

impl Default for SavedSettings {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            message: DEFAULT_MESSAGE.to_string(),
            quick_close_confirm_text: DEFAULT_QUICK_CLOSE_CONFIRM_TEXT.to_string(),
            active_hours: ActiveHoursSpec::parse(DEFAULT_ACTIVE_HOURS).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved settings. Never fails: a missing or corrupt file yields defaults,
    /// and each field that is present but invalid falls back on its own.
    pub fn load(&self) -> SavedSettings {
        let mut saved = SavedSettings::default();
        let Some(document) = self.read_document() else {
            return saved;
        };

        if let Some(interval) = document.get(KEY_INTERVAL).and_then(positive_minutes) {
            saved.interval_minutes = interval;
        }
        if let Some(message) = document.get(KEY_MESSAGE).and_then(non_empty_text) {
            saved.message = message;
        }
        if let Some(text) = document.get(KEY_QUICK_CLOSE).and_then(non_empty_text) {
            saved.quick_close_confirm_text = text;
        }

        let active_hours = match document.get(KEY_ACTIVE_HOURS) {
            None | Some(Value::Null) => document.get(KEY_ACTIVE_HOURS_LEGACY),
            present => present,
        };
        if let Some(Value::String(text)) = active_hours {
            match ActiveHoursSpec::parse(text) {
                Ok(spec) => saved.active_hours = spec,
                Err(e) => warn!("Ignoring saved active hours '{}': {}", text, e),
            }
        }

        debug!("Loaded settings from {}: {:?}", self.path.display(), saved);
        saved
    }

    /// Overlay the four known keys onto the existing document and write it back.
    /// Keys this version does not know about are carried through untouched.
    pub fn save(&self, config: &ReminderConfig) -> Result<(), ReminderError> {
        let mut document = self.read_document().unwrap_or_default();

        document.insert(KEY_INTERVAL.to_string(), Value::from(config.interval_minutes));
        document.insert(KEY_MESSAGE.to_string(), Value::from(config.message.clone()));
        document.insert(
            KEY_QUICK_CLOSE.to_string(),
            Value::from(config.quick_close_confirm_text.clone()),
        );
        document.insert(
            KEY_ACTIVE_HOURS.to_string(),
            Value::from(config.active_hours.normalized()),
        );

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| ReminderError::persistence("create directory", dir, e))?;
        }

        let serialized = serde_json::to_string_pretty(&Value::Object(document))?;
        fs::write(&self.path, serialized)
            .map_err(|e| ReminderError::persistence("write settings", &self.path, e))?;

        info!("Settings persisted to: {}", self.path.display());
        Ok(())
    }

    /// The current document as a JSON object, or `None` if unreadable or not an object
    fn read_document(&self) -> Option<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Settings file {} not readable: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => Some(document),
            Ok(_) => {
                warn!("Settings file {} is not a JSON object, using defaults", self.path.display());
                None
            }
            Err(e) => {
                warn!("Settings file {} is corrupt ({}), using defaults", self.path.display(), e);
                None
            }
        }
    }
}

/// Accepts a JSON number or a numeric string, finite and > 0
fn positive_minutes(value: &Value) -> Option<f64> {
    let minutes = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (minutes.is_finite() && minutes > 0.0).then_some(minutes)
}

fn non_empty_text(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
