//! Desktop Reminder - periodic break reminders
//!
//! This is the main entry point for the desktop-reminder application.

use tokio::sync::watch;
use tracing::{info, warn};

use desktop_reminder::{
    api::HttpNotifier,
    config::Config,
    services::{
        instance::{self, InstanceGuard},
        SettingsStore,
    },
    state::SessionSnapshot,
    tasks::{
        events, run_session, Collaborators, ReminderSessionController, TokioTimer,
    },
    ui::{console::ConsoleUi, NoopNotifier, Notifier},
    utils::{forward_shutdown, logging, SystemClock},
};

/// Exit code when another instance already owns the control address
const EXIT_ALREADY_RUNNING: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let log_file = config.log_file();
    if let Err(e) = logging::init(config.log_level(), log_file.as_deref()) {
        eprintln!("{}", e);
    }

    info!("Starting desktop-reminder v{}", env!("CARGO_PKG_VERSION"));

    let store = SettingsStore::new(config.settings_path());
    let saved = store.load();
    let (reminder_config, options) = config.resolve(saved);
    info!("Configuration: {}", reminder_config.summary());

    let (sender, rx) = events::channel();
    let (status_tx, status_rx) = watch::channel(SessionSnapshot::default());

    let notifier: Box<dyn Notifier> = if config.no_control {
        info!("Control surface disabled");
        Box::new(NoopNotifier)
    } else {
        match instance::acquire(&config.control_addr).await {
            InstanceGuard::Acquired(listener) => {
                Box::new(HttpNotifier::new(
                    listener,
                    sender.clone(),
                    status_rx,
                    config.tray_icon.clone(),
                ))
            }
            InstanceGuard::AlreadyRunning => {
                info!("Another instance is already running on {}", config.control_addr);
                instance::focus_existing(&config.control_addr).await;
                println!("desktop-reminder is already running");
                std::process::exit(EXIT_ALREADY_RUNNING);
            }
            InstanceGuard::Unavailable(e) => {
                warn!("{}; continuing without control surface", e);
                Box::new(NoopNotifier)
            }
        }
    };

    let controller = ReminderSessionController::new(
        reminder_config,
        options,
        Some(store),
        Collaborators {
            ui: Box::new(ConsoleUi::stdout()),
            notifier,
            timer: Box::new(TokioTimer::new(sender.clone())),
            clock: Box::new(SystemClock),
            status: status_tx,
        },
    );

    tokio::spawn(forward_shutdown(sender));

    run_session(controller, rx).await;

    info!("Shutdown complete");
    Ok(())
}
