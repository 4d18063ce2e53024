//! Terminal rendering of reminders

use std::io::{self, Write};

use tracing::{info, warn};

use crate::state::ReminderConfig;

use super::{ReminderUi, ReminderView};

/// Draws reminders as framed blocks on a terminal
pub struct ConsoleUi<W: Write + Send = io::Stdout> {
    out: W,
}

impl ConsoleUi {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, block: &str) {
        if let Err(e) = self.out.write_all(block.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }
}

/// Box `lines` with a title bar, wrapped to `width` columns
fn frame(title: &str, lines: &[&str], width: usize) -> String {
    let inner = width.max(title.chars().count() + 4).max(16);
    let mut block = format!("+{}+\n", "-".repeat(inner));
    block.push_str(&format!("| {:<w$} |\n", title, w = inner - 2));
    block.push_str(&format!("+{}+\n", "-".repeat(inner)));
    for line in lines {
        for chunk in wrap(line, inner - 2) {
            block.push_str(&format!("| {:<w$} |\n", chunk, w = inner - 2));
        }
    }
    block.push_str(&format!("+{}+\n", "-".repeat(inner)));
    block
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Pixel width of the popup mapped to terminal columns
fn columns(view: &ReminderView) -> usize {
    (view.width as usize / 8).clamp(16, 76)
}

impl<W: Write + Send> ReminderUi for ConsoleUi<W> {
    fn show_reminder(&mut self, view: &ReminderView) {
        let block = frame(&view.title, &[&view.message], columns(view));
        self.emit(&block);
        info!("Reminder shown ({}x{})", view.width, view.height);
    }

    fn focus_reminder(&mut self) {
        self.emit("(reminder is still open)\n");
    }

    fn close_reminder(&mut self) {
        self.emit("(reminder closed)\n");
    }

    fn ask_quick_close(&mut self, prompt: &str) {
        let hint = "POST /reminder/confirm {\"close\": true|false}";
        let block = frame("Confirm close", &[prompt, hint], 48);
        self.emit(&block);
    }

    fn open_settings(&mut self, config: &ReminderConfig) {
        let interval = format!("interval_minutes: {}", config.interval_minutes);
        let message = format!("message: {}", config.message);
        let quick_close = format!("quick_close_confirm_text: {}", config.quick_close_confirm_text);
        let active = format!("active_hours: {}", config.active_hours.normalized());
        let block = frame(
            "Settings (PUT /settings)",
            &[&interval, &message, &quick_close, &active],
            60,
        );
        self.emit(&block);
    }

    fn show_control(&mut self, summary: &str) {
        let block = frame("Desktop Reminder", &[summary], 60);
        self.emit(&block);
    }
}
