//! Reminder session controller
//!
//! Owns the live configuration and the schedule, and reacts to the events
//! that the tray surface, the reminder UI and the timers post to the queue.

use std::{
    path::PathBuf,
    time::{Duration, SystemTime},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::ValidationError,
    services::{pid_file, LogRetentionPolicy, SettingsStore},
    state::{
        reminder_config::format_minutes, DismissOutcome, ReminderConfig, SessionPhase,
        SessionSnapshot, SettingsCandidate, TimerHandle,
    },
    ui::{clip_tooltip, Notifier, ReminderUi, ReminderView},
    utils::clock::Clock,
};

use super::{
    events::SessionEvent,
    scheduler::{FireOutcome, ReminderScheduler, TimerDriver},
};

/// A reminder closed sooner than this asks for confirmation first
pub const QUICK_CLOSE_CONFIRM_WINDOW: Duration = Duration::from_secs(20);

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runtime options that are not user-editable settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub show_on_start: bool,
    pub show_control_window: bool,
    pub log_file: Option<PathBuf>,
    pub pid_file: Option<PathBuf>,
    pub log_retention: LogRetentionPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_on_start: false,
            show_control_window: false,
            log_file: None,
            pid_file: None,
            log_retention: LogRetentionPolicy::new(14, 100),
        }
    }
}

/// Everything the controller talks to but does not own the logic of
pub struct Collaborators {
    pub ui: Box<dyn ReminderUi>,
    pub notifier: Box<dyn Notifier>,
    pub timer: Box<dyn TimerDriver>,
    pub clock: Box<dyn Clock>,
    pub status: watch::Sender<SessionSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug)]
struct OpenReminder {
    shown_at: std::time::Instant,
    awaiting_confirmation: bool,
}

pub struct ReminderSessionController {
    config: ReminderConfig,
    options: SessionOptions,
    settings: Option<SettingsStore>,
    scheduler: ReminderScheduler,
    ui: Box<dyn ReminderUi>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    status: watch::Sender<SessionSnapshot>,
    phase: SessionPhase,
    reminder: Option<OpenReminder>,
    last_fire_skipped: Option<bool>,
    status_line: String,
}

impl ReminderSessionController {
    pub fn new(
        config: ReminderConfig,
        options: SessionOptions,
        settings: Option<SettingsStore>,
        collaborators: Collaborators,
    ) -> Self {
        let Collaborators {
            ui,
            notifier,
            timer,
            clock,
            status,
        } = collaborators;

        Self {
            scheduler: ReminderScheduler::new(timer, config.interval_minutes),
            config,
            options,
            settings,
            ui,
            notifier,
            clock,
            status,
            phase: SessionPhase::Idle,
            reminder: None,
            last_fire_skipped: None,
            status_line: "Waiting for the first reminder".to_string(),
        }
    }

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    pub fn is_reminder_open(&self) -> bool {
        self.reminder.is_some()
    }

    /// Prune logs, write the PID marker, start the tray surface, optionally
    /// show a first reminder, then arm the countdown.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::Idle {
            warn!("Session already started ({:?})", self.phase);
            return;
        }

        if let Some(log_file) = &self.options.log_file {
            let now: SystemTime = self.clock.now().into();
            self.options.log_retention.prune(log_file, now);
        }
        if let Some(pid_file) = &self.options.pid_file {
            if let Err(e) = pid_file::write_pid_file(pid_file) {
                warn!("{}", e);
            }
        }

        info!(
            "Reminder app started (interval={} minutes, show_on_start={}, active_hours={})",
            format_minutes(self.config.interval_minutes),
            self.options.show_on_start,
            self.config.active_hours.summary()
        );

        if let Err(e) = self.notifier.start() {
            warn!("Tray surface failed to start: {}", e);
        }
        if self.options.show_control_window {
            self.show_control();
        }

        if self.options.show_on_start {
            if self.config.active_hours.is_active(self.current_hour()) {
                self.request_show();
            } else {
                info!("Skip startup reminder because current time is outside active hours.");
            }
        }

        self.rearm();
    }

    /// Validate `candidate` as a whole; on success swap it in, persist it and
    /// restart the countdown with the new interval.
    pub fn apply_settings(
        &mut self,
        candidate: &SettingsCandidate,
    ) -> Result<(), ValidationError> {
        if let Err(e) = self.config.apply(candidate) {
            warn!("Settings rejected ({}): {}", e.field(), e);
            return Err(e);
        }

        info!(
            "Settings updated (interval={} minutes, active_hours={})",
            format_minutes(self.config.interval_minutes),
            self.config.active_hours.summary()
        );
        if let Some(store) = &self.settings {
            if let Err(e) = store.save(&self.config) {
                warn!("Failed to persist settings: {}", e);
            }
        }

        self.rearm();
        Ok(())
    }

    pub fn on_timer_fired(&mut self, handle: TimerHandle) {
        let now = self.clock.now();
        match self.scheduler.on_fire(handle, now, &self.config.active_hours) {
            FireOutcome::Stale => return,
            FireOutcome::Show => {
                self.phase = SessionPhase::Firing;
                self.last_fire_skipped = Some(false);
                self.request_show();
            }
            FireOutcome::Skipped => {
                self.phase = SessionPhase::Skipped;
                self.last_fire_skipped = Some(true);
            }
        }
        self.on_armed();
        if self.last_fire_skipped == Some(true) {
            self.status_line = format!(
                "Outside active hours ({}), skipped; {}",
                self.config.active_hours.summary(),
                self.status_line
            );
            self.publish();
        }
    }

    /// Show the reminder, or bring the open one to the front
    pub fn request_show(&mut self) {
        if self.reminder.is_some() {
            info!("Reminder already open. Bringing existing window to front.");
            self.ui.focus_reminder();
            self.status_line = "Reminder already open, brought to front".to_string();
            self.publish();
            return;
        }

        self.ui.show_reminder(&ReminderView::from(&self.config));
        self.reminder = Some(OpenReminder {
            shown_at: self.clock.instant(),
            awaiting_confirmation: false,
        });
        self.status_line = "Reminder open, waiting to be dismissed".to_string();
        self.publish();
    }

    /// Dismiss using the time elapsed since the reminder was shown
    pub fn dismiss_reminder(&mut self) -> DismissOutcome {
        let Some(open) = &self.reminder else {
            return DismissOutcome::NotOpen;
        };
        let elapsed = self.clock.instant().saturating_duration_since(open.shown_at);
        self.on_reminder_dismissed(elapsed)
    }

    /// A dismissal within the grace period asks the user first
    pub fn on_reminder_dismissed(&mut self, elapsed_since_shown: Duration) -> DismissOutcome {
        let Some(open) = self.reminder.as_mut() else {
            return DismissOutcome::NotOpen;
        };

        if elapsed_since_shown < QUICK_CLOSE_CONFIRM_WINDOW {
            open.awaiting_confirmation = true;
            let prompt = self.config.quick_close_confirm_text.clone();
            self.ui.ask_quick_close(&prompt);
            debug!("Quick close after {:?}, asking for confirmation", elapsed_since_shown);
            self.publish();
            return DismissOutcome::ConfirmRequired { prompt };
        }

        self.close_reminder();
        DismissOutcome::Closed
    }

    /// The user's answer to the quick-close question
    pub fn on_quick_close_answer(&mut self, close: bool) -> DismissOutcome {
        let Some(open) = self.reminder.as_mut() else {
            return DismissOutcome::NotOpen;
        };
        if !open.awaiting_confirmation {
            debug!("Quick-close answer without a pending question, ignoring");
            return DismissOutcome::Kept;
        }
        open.awaiting_confirmation = false;

        if close {
            self.close_reminder();
            return DismissOutcome::Closed;
        }

        info!("Quick-close canceled by user; reminder window kept open.");
        self.ui.focus_reminder();
        self.publish();
        DismissOutcome::Kept
    }

    pub fn open_settings(&mut self) {
        self.ui.open_settings(&self.config);
        info!("Settings window shown from tray menu.");
    }

    pub fn show_control(&mut self) {
        let summary = self.config.summary();
        self.ui.show_control(&summary);
        info!("Control window shown.");
    }

    /// Stop everything. Terminal: later calls do nothing.
    pub fn quit(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        info!("Exit requested by user. Shutting down.");

        self.scheduler.disarm();
        self.notifier.stop();
        if self.reminder.take().is_some() {
            self.ui.close_reminder();
        }
        if let Some(pid_file) = &self.options.pid_file {
            if let Err(e) = pid_file::remove_pid_file(pid_file) {
                warn!("{}", e);
            }
        }

        self.phase = SessionPhase::Shutdown;
        self.status_line = "Stopped".to_string();
        self.publish();
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> LoopControl {
        if self.phase.is_terminal() {
            debug!("Session stopped, ignoring {}", event.name());
            return LoopControl::Exit;
        }

        match event {
            SessionEvent::ShowControl => self.show_control(),
            SessionEvent::OpenSettings => self.open_settings(),
            SessionEvent::ShowReminder => self.request_show(),
            SessionEvent::ApplySettings { candidate, reply } => {
                let _ = reply.send(self.apply_settings(&candidate));
            }
            SessionEvent::DismissReminder { reply } => {
                let _ = reply.send(self.dismiss_reminder());
            }
            SessionEvent::QuickCloseAnswer { close, reply } => {
                let _ = reply.send(self.on_quick_close_answer(close));
            }
            SessionEvent::TimerFired(handle) => self.on_timer_fired(handle),
            SessionEvent::Quit => self.quit(),
        }

        if self.phase.is_terminal() {
            LoopControl::Exit
        } else {
            LoopControl::Continue
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            next_reminder_at: self.scheduler.next_fire_at(),
            reminder_open: self.reminder.is_some(),
            awaiting_confirmation: self
                .reminder
                .as_ref()
                .is_some_and(|open| open.awaiting_confirmation),
            interval_minutes: self.config.interval_minutes,
            active_hours: self.config.active_hours.normalized().to_string(),
            message: self.config.message.clone(),
            last_fire_skipped: self.last_fire_skipped,
            status_line: self.status_line.clone(),
        }
    }

    /// Arm a fresh countdown with the current interval
    fn rearm(&mut self) {
        let now = self.clock.now();
        self.scheduler.arm(now, self.config.interval_minutes);
        self.on_armed();
    }

    fn on_armed(&mut self) {
        self.phase = SessionPhase::Armed;
        let tooltip = match self.scheduler.next_fire_at() {
            Some(at) => {
                let at = at.format(TIME_FORMAT).to_string();
                info!("Next reminder scheduled at {}", at);
                self.status_line = format!("Next reminder: {}", at);
                format!("Desktop Reminder | next reminder {}", at)
            }
            None => "Desktop Reminder | waiting for next reminder".to_string(),
        };
        self.notifier.update_tooltip(&clip_tooltip(&tooltip));
        self.publish();
    }

    fn close_reminder(&mut self) {
        self.reminder = None;
        self.ui.close_reminder();
        self.status_line = match self.scheduler.next_fire_at() {
            Some(at) => format!("Next reminder: {}", at.format(TIME_FORMAT)),
            None => "Waiting for the next reminder".to_string(),
        };
        info!("Reminder window closed by user.");
        self.publish();
    }

    fn current_hour(&self) -> u32 {
        chrono::Timelike::hour(&self.clock.now())
    }

    fn publish(&self) {
        self.status.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ReminderError,
        tasks::scheduler::tests::FakeTimer,
        state::ActiveHoursSpec,
    };
    use chrono::{DateTime, Local, TimeZone};
    use std::{
        sync::{Arc, Mutex},
        time::Instant,
    };
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq)]
    enum UiCall {
        Show(String),
        Focus,
        Close,
        AskQuickClose(String),
        OpenSettings,
        ShowControl,
    }

    #[derive(Clone, Default)]
    struct FakeUi {
        calls: Arc<Mutex<Vec<UiCall>>>,
    }

    impl FakeUi {
        fn calls(&self) -> Vec<UiCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ReminderUi for FakeUi {
        fn show_reminder(&mut self, view: &ReminderView) {
            self.calls.lock().unwrap().push(UiCall::Show(view.message.clone()));
        }
        fn focus_reminder(&mut self) {
            self.calls.lock().unwrap().push(UiCall::Focus);
        }
        fn close_reminder(&mut self) {
            self.calls.lock().unwrap().push(UiCall::Close);
        }
        fn ask_quick_close(&mut self, prompt: &str) {
            self.calls.lock().unwrap().push(UiCall::AskQuickClose(prompt.to_string()));
        }
        fn open_settings(&mut self, _config: &ReminderConfig) {
            self.calls.lock().unwrap().push(UiCall::OpenSettings);
        }
        fn show_control(&mut self, _summary: &str) {
            self.calls.lock().unwrap().push(UiCall::ShowControl);
        }
    }

    #[derive(Debug, Default)]
    struct NotifierLog {
        started: bool,
        stopped: bool,
        tooltips: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct FakeNotifier {
        log: Arc<Mutex<NotifierLog>>,
        fail_start: bool,
    }

    impl Notifier for FakeNotifier {
        fn start(&mut self) -> Result<(), ReminderError> {
            if self.fail_start {
                return Err(ReminderError::unavailable("tray", "not supported"));
            }
            self.log.lock().unwrap().started = true;
            Ok(())
        }
        fn stop(&mut self) {
            self.log.lock().unwrap().stopped = true;
        }
        fn update_tooltip(&mut self, tooltip: &str) {
            self.log.lock().unwrap().tooltips.push(tooltip.to_string());
        }
    }

    #[derive(Clone)]
    struct ManualClock {
        inner: Arc<Mutex<(DateTime<Local>, Instant)>>,
    }

    impl ManualClock {
        fn at(hour: u32, minute: u32) -> Self {
            let now = Local.with_ymd_and_hms(2026, 6, 10, hour, minute, 0).unwrap();
            Self {
                inner: Arc::new(Mutex::new((now, Instant::now()))),
            }
        }

        fn advance(&self, by: Duration) {
            let mut inner = self.inner.lock().unwrap();
            inner.0 += chrono::Duration::from_std(by).unwrap();
            inner.1 += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Local> {
            self.inner.lock().unwrap().0
        }
        fn instant(&self) -> Instant {
            self.inner.lock().unwrap().1
        }
    }

    struct Harness {
        controller: ReminderSessionController,
        ui: FakeUi,
        notifier: FakeNotifier,
        timer: FakeTimer,
        clock: ManualClock,
        status: watch::Receiver<SessionSnapshot>,
    }

    fn harness_with(
        config: ReminderConfig,
        options: SessionOptions,
        settings: Option<SettingsStore>,
        clock: ManualClock,
    ) -> Harness {
        let ui = FakeUi::default();
        let notifier = FakeNotifier::default();
        let timer = FakeTimer::default();
        let (status_tx, status) = watch::channel(SessionSnapshot::default());

        let controller = ReminderSessionController::new(
            config,
            options,
            settings,
            Collaborators {
                ui: Box::new(ui.clone()),
                notifier: Box::new(notifier.clone()),
                timer: Box::new(timer.clone()),
                clock: Box::new(clock.clone()),
                status: status_tx,
            },
        );

        Harness {
            controller,
            ui,
            notifier,
            timer,
            clock,
            status,
        }
    }

    fn harness() -> Harness {
        harness_with(
            ReminderConfig::default(),
            SessionOptions::default(),
            None,
            ManualClock::at(10, 0),
        )
    }

    fn candidate(interval_minutes: f64) -> SettingsCandidate {
        SettingsCandidate {
            interval_minutes,
            message: "Look away".into(),
            quick_close_confirm_text: "Sure?".into(),
            active_hours: "8-20".into(),
        }
    }

    fn last_handle(timer: &FakeTimer) -> TimerHandle {
        timer.log.lock().unwrap().armed.last().unwrap().0
    }

    #[test]
    fn start_arms_first_countdown() {
        let mut h = harness();
        h.controller.start();

        assert_eq!(h.controller.phase(), SessionPhase::Armed);
        assert_eq!(
            h.controller.scheduler().next_fire_at(),
            Some(h.clock.now() + chrono::Duration::minutes(25))
        );
        assert!(h.notifier.log.lock().unwrap().started);
        assert!(h.ui.calls().is_empty());

        let tooltip = h.notifier.log.lock().unwrap().tooltips.last().cloned().unwrap();
        assert_eq!(tooltip, "Desktop Reminder | next reminder 2026-06-10 10:25:00");
        assert_eq!(h.status.borrow().phase, SessionPhase::Armed);
    }

    #[test]
    fn show_on_start_respects_active_hours() {
        let options = SessionOptions {
            show_on_start: true,
            ..SessionOptions::default()
        };

        let mut inside = harness_with(
            ReminderConfig::default(),
            options.clone(),
            None,
            ManualClock::at(10, 0),
        );
        inside.controller.start();
        assert_eq!(inside.ui.calls(), vec![UiCall::Show(ReminderConfig::default().message)]);

        let mut outside = harness_with(
            ReminderConfig::default(),
            options,
            None,
            ManualClock::at(19, 30),
        );
        outside.controller.start();
        assert!(!outside.controller.is_reminder_open());
        assert_eq!(outside.controller.phase(), SessionPhase::Armed);
    }

    #[test]
    fn notifier_failure_does_not_stop_scheduling() {
        let ui = FakeUi::default();
        let timer = FakeTimer::default();
        let (status_tx, _status) = watch::channel(SessionSnapshot::default());
        let mut controller = ReminderSessionController::new(
            ReminderConfig::default(),
            SessionOptions::default(),
            None,
            Collaborators {
                ui: Box::new(ui),
                notifier: Box::new(FakeNotifier {
                    fail_start: true,
                    ..FakeNotifier::default()
                }),
                timer: Box::new(timer.clone()),
                clock: Box::new(ManualClock::at(10, 0)),
                status: status_tx,
            },
        );

        controller.start();
        assert_eq!(controller.phase(), SessionPhase::Armed);
        assert_eq!(timer.log.lock().unwrap().outstanding().len(), 1);
    }

    #[test]
    fn fire_in_active_hours_shows_and_rearms() {
        let mut h = harness();
        h.controller.start();
        h.clock.advance(Duration::from_secs(25 * 60));

        h.controller.on_timer_fired(last_handle(&h.timer));

        assert_eq!(h.ui.calls(), vec![UiCall::Show(ReminderConfig::default().message)]);
        assert_eq!(h.controller.phase(), SessionPhase::Armed);
        assert_eq!(
            h.controller.scheduler().next_fire_at(),
            Some(h.clock.now() + chrono::Duration::minutes(25))
        );
        assert_eq!(
            h.controller.scheduler().state().pending_timer,
            Some(TimerHandle::new(2))
        );
    }

    #[test]
    fn fire_outside_active_hours_skips_and_rearms() {
        let mut h = harness_with(
            ReminderConfig::default(),
            SessionOptions::default(),
            None,
            ManualClock::at(18, 50),
        );
        h.controller.start();
        h.clock.advance(Duration::from_secs(25 * 60));

        h.controller.on_timer_fired(last_handle(&h.timer));

        assert!(h.ui.calls().is_empty());
        assert_eq!(h.status.borrow().last_fire_skipped, Some(true));
        assert_eq!(h.controller.phase(), SessionPhase::Armed);
        assert_eq!(
            h.controller.scheduler().next_fire_at(),
            Some(h.clock.now() + chrono::Duration::minutes(25))
        );
    }

    #[test]
    fn second_fire_focuses_the_open_reminder() {
        let mut h = harness();
        h.controller.start();
        h.controller.on_timer_fired(last_handle(&h.timer));
        h.controller.on_timer_fired(last_handle(&h.timer));

        let calls = h.ui.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], UiCall::Focus);
    }

    #[test]
    fn request_show_is_idempotent() {
        let mut h = harness();
        h.controller.request_show();
        h.controller.request_show();

        assert_eq!(
            h.ui.calls(),
            vec![UiCall::Show(ReminderConfig::default().message), UiCall::Focus]
        );
        assert!(h.controller.is_reminder_open());
    }

    #[test]
    fn apply_settings_swaps_config_and_rearms_without_carryover() {
        let mut h = harness();
        h.controller.start();
        h.clock.advance(Duration::from_secs(20 * 60));

        h.controller.apply_settings(&candidate(10.0)).unwrap();

        assert_eq!(h.controller.config().interval_minutes, 10.0);
        assert_eq!(h.controller.config().message, "Look away");
        assert_eq!(
            h.controller.scheduler().next_fire_at(),
            Some(h.clock.now() + chrono::Duration::minutes(10))
        );
        let log = h.timer.log.lock().unwrap();
        assert_eq!(log.cancelled, vec![TimerHandle::new(1)]);
        assert_eq!(log.outstanding(), vec![TimerHandle::new(2)]);
    }

    #[test]
    fn invalid_settings_leave_everything_untouched() {
        let mut h = harness();
        h.controller.start();
        let before = h.controller.config().clone();
        let next_before = h.controller.scheduler().next_fire_at();

        let result = h.controller.apply_settings(&candidate(-1.0));

        assert_eq!(result, Err(ValidationError::NonPositiveInterval(-1.0)));
        assert_eq!(h.controller.config(), &before);
        assert_eq!(h.controller.scheduler().next_fire_at(), next_before);
        assert_eq!(h.timer.log.lock().unwrap().armed.len(), 1);
    }

    #[test]
    fn applied_settings_are_persisted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let mut h = harness_with(
            ReminderConfig::default(),
            SessionOptions::default(),
            Some(store.clone()),
            ManualClock::at(10, 0),
        );
        h.controller.start();

        h.controller.apply_settings(&candidate(15.0)).unwrap();

        let saved = store.load();
        assert_eq!(saved.interval_minutes, 15.0);
        assert_eq!(saved.message, "Look away");
        assert_eq!(saved.active_hours, ActiveHoursSpec::parse("8-20").unwrap());
    }

    #[test]
    fn persistence_failure_still_applies_and_rearms() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SettingsStore::new(dir.path());
        let mut h = harness_with(
            ReminderConfig::default(),
            SessionOptions::default(),
            Some(store),
            ManualClock::at(10, 0),
        );
        h.controller.start();

        assert!(h.controller.apply_settings(&candidate(15.0)).is_ok());
        assert_eq!(h.controller.config().interval_minutes, 15.0);
        assert_eq!(h.timer.log.lock().unwrap().outstanding().len(), 1);
    }

    #[test]
    fn quick_dismiss_asks_and_decline_keeps_reminder() {
        let mut h = harness();
        h.controller.request_show();
        h.clock.advance(Duration::from_secs(5));

        let outcome = h.controller.dismiss_reminder();
        assert_eq!(
            outcome,
            DismissOutcome::ConfirmRequired {
                prompt: ReminderConfig::default().quick_close_confirm_text
            }
        );
        assert!(h.status.borrow().awaiting_confirmation);

        assert_eq!(h.controller.on_quick_close_answer(false), DismissOutcome::Kept);
        assert!(h.controller.is_reminder_open());
        assert_eq!(h.ui.calls().last(), Some(&UiCall::Focus));
    }

    #[test]
    fn quick_dismiss_confirmed_closes() {
        let mut h = harness();
        h.controller.request_show();

        assert!(matches!(
            h.controller.on_reminder_dismissed(Duration::from_secs(3)),
            DismissOutcome::ConfirmRequired { .. }
        ));
        assert_eq!(h.controller.on_quick_close_answer(true), DismissOutcome::Closed);
        assert!(!h.controller.is_reminder_open());
        assert_eq!(h.ui.calls().last(), Some(&UiCall::Close));
    }

    #[test]
    fn late_dismiss_closes_immediately() {
        let mut h = harness();
        h.controller.request_show();
        h.clock.advance(QUICK_CLOSE_CONFIRM_WINDOW);

        assert_eq!(h.controller.dismiss_reminder(), DismissOutcome::Closed);
        assert!(!h.ui.calls().iter().any(|c| matches!(c, UiCall::AskQuickClose(_))));
    }

    #[test]
    fn dismiss_without_reminder_is_not_open() {
        let mut h = harness();
        assert_eq!(h.controller.dismiss_reminder(), DismissOutcome::NotOpen);
        assert_eq!(h.controller.on_quick_close_answer(true), DismissOutcome::NotOpen);
    }

    #[test]
    fn unsolicited_answer_changes_nothing() {
        let mut h = harness();
        h.controller.request_show();
        assert_eq!(h.controller.on_quick_close_answer(true), DismissOutcome::Kept);
        assert!(h.controller.is_reminder_open());
    }

    #[test]
    fn quit_cancels_timer_and_is_terminal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pid_path = dir.path().join("reminder.pid");
        let mut h = harness_with(
            ReminderConfig::default(),
            SessionOptions {
                pid_file: Some(pid_path.clone()),
                ..SessionOptions::default()
            },
            None,
            ManualClock::at(10, 0),
        );
        h.controller.start();
        assert!(pid_path.exists());
        h.controller.request_show();

        assert_eq!(h.controller.handle_event(SessionEvent::Quit), LoopControl::Exit);

        assert_eq!(h.controller.phase(), SessionPhase::Shutdown);
        assert!(h.timer.log.lock().unwrap().outstanding().is_empty());
        assert!(h.notifier.log.lock().unwrap().stopped);
        assert!(!pid_path.exists());
        assert_eq!(h.ui.calls().last(), Some(&UiCall::Close));
        assert_eq!(h.controller.handle_event(SessionEvent::ShowReminder), LoopControl::Exit);
        assert!(!h.controller.is_reminder_open());
    }

    #[test]
    fn events_route_to_operations() {
        let mut h = harness();
        h.controller.start();

        let (reply, mut rx) = oneshot::channel();
        let control = h.controller.handle_event(SessionEvent::ApplySettings {
            candidate: candidate(5.0),
            reply,
        });
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(rx.try_recv().unwrap(), Ok(()));

        h.controller.handle_event(SessionEvent::OpenSettings);
        h.controller.handle_event(SessionEvent::ShowControl);
        h.controller.handle_event(SessionEvent::ShowReminder);

        let (reply, mut rx) = oneshot::channel();
        h.controller.handle_event(SessionEvent::DismissReminder { reply });
        assert!(matches!(rx.try_recv().unwrap(), DismissOutcome::ConfirmRequired { .. }));

        let (reply, mut rx) = oneshot::channel();
        h.controller.handle_event(SessionEvent::QuickCloseAnswer { close: true, reply });
        assert_eq!(rx.try_recv().unwrap(), DismissOutcome::Closed);

        assert_eq!(
            h.ui.calls(),
            vec![
                UiCall::OpenSettings,
                UiCall::ShowControl,
                UiCall::Show("Look away".into()),
                UiCall::AskQuickClose("Sure?".into()),
                UiCall::Close,
            ]
        );
    }

    #[test]
    fn start_prunes_logs_next_to_active_log() {
        let dir = tempfile::tempdir().expect("temp dir");
        let active = dir.path().join("desktop_reminder_today.log");
        let stale = dir.path().join("desktop_reminder_old.log");
        std::fs::File::create(&active).unwrap();
        let file = std::fs::File::create(&stale).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(30 * 86_400))
            .unwrap();

        let clock = ManualClock {
            inner: Arc::new(Mutex::new((Local::now(), Instant::now()))),
        };
        let mut h = harness_with(
            ReminderConfig::default(),
            SessionOptions {
                log_file: Some(active.clone()),
                ..SessionOptions::default()
            },
            None,
            clock,
        );
        h.controller.start();

        assert!(active.exists());
        assert!(!stale.exists());
    }
}
