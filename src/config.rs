//! Configuration and CLI argument handling

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    services::{
        log_retention::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX},
        settings_store::SETTINGS_FILE_NAME,
        LogRetentionPolicy, SavedSettings,
    },
    state::{
        reminder_config::{DEFAULT_TITLE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH},
        ActiveHoursSpec, ReminderConfig,
    },
    tasks::SessionOptions,
};

pub const DEFAULT_CONTROL_ADDR: &str = "127.0.0.1:20554";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "desktop-reminder")]
#[command(about = "Periodic desktop break reminder with a local control surface")]
#[command(version)]
pub struct Config {
    /// Minutes between reminders (overrides the saved setting)
    #[arg(long, value_parser = positive_minutes)]
    pub interval_minutes: Option<f64>,

    /// Reminder text (overrides the saved setting)
    #[arg(long, value_parser = non_empty)]
    pub message: Option<String>,

    /// Prompt shown when the reminder is closed too quickly
    #[arg(long, value_parser = non_empty)]
    pub quick_close_confirm_text: Option<String>,

    /// Active hours such as "9-12/13-18"; empty means all day
    #[arg(long, value_parser = ActiveHoursSpec::parse)]
    pub active_hours: Option<ActiveHoursSpec>,

    /// Show a reminder immediately at startup
    #[arg(long)]
    pub show_on_start: bool,

    /// Reminder window width
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub window_width: u32,

    /// Reminder window height
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub window_height: u32,

    /// Reminder window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Directory for a dated log file, used when --log-file is absent
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Write the process id here while running
    #[arg(long)]
    pub pid_file: Option<PathBuf>,

    /// Settings file path (default: next to the executable)
    #[arg(long)]
    pub settings_file: Option<PathBuf>,

    /// Delete log files older than this many days (0 disables)
    #[arg(long, default_value = "14")]
    pub log_retention_days: u32,

    /// Keep at most this many log files (0 disables)
    #[arg(long, default_value = "100")]
    pub log_max_files: usize,

    /// Tray icon image; reported by the control surface
    #[arg(long)]
    pub tray_icon: Option<PathBuf>,

    /// Show the control window at startup
    #[arg(long)]
    pub show_control_window: bool,

    /// Address of the local control surface
    #[arg(long, default_value = DEFAULT_CONTROL_ADDR)]
    pub control_addr: String,

    /// Run without the control surface
    #[arg(long)]
    pub no_control: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn positive_minutes(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|_| format!("`{}` is not a number", s))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err("interval must be greater than 0".to_string())
    }
}

fn non_empty(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings_file {
            return path.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
    }

    /// Explicit log file, else today's dated file inside `--log-dir`
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file_on(Local::now().date_naive())
    }

    fn log_file_on(&self, date: NaiveDate) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }
        self.log_dir.as_ref().map(|dir| {
            dir.join(format!("{}{}{}", LOG_FILE_PREFIX, date.format("%Y%m%d"), LOG_FILE_SUFFIX))
        })
    }

    /// Merge saved settings under explicit flags
    pub fn resolve(&self, saved: SavedSettings) -> (ReminderConfig, SessionOptions) {
        let config = ReminderConfig {
            interval_minutes: self.interval_minutes.unwrap_or(saved.interval_minutes),
            message: self.message.clone().unwrap_or(saved.message),
            quick_close_confirm_text: self
                .quick_close_confirm_text
                .clone()
                .unwrap_or(saved.quick_close_confirm_text),
            active_hours: self.active_hours.clone().unwrap_or(saved.active_hours),
            title: self.title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
        };
        let options = SessionOptions {
            show_on_start: self.show_on_start,
            show_control_window: self.show_control_window,
            log_file: self.log_file(),
            pid_file: self.pid_file.clone(),
            log_retention: LogRetentionPolicy::new(self.log_retention_days, self.log_max_files),
        };
        (config, options)
    }
}
