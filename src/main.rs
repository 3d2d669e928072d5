//! # alarm-rs
//!
//! Threshold alarms for host metrics and sensor readings.
//!
//! ## Overview
//!
//! `alarm-rs` samples readings at a fixed interval and classifies each one
//! as OK, Warning, Critical or Unknown with a [`alarm_rs::ThresholdMonitor`]
//! per metric. Results are shown in a terminal dashboard (or printed in
//! headless mode) and appended to a CSV log.
//!
//! ## Usage
//!
//! ```bash
//! # Watch the local host with the default monitors
//! alarm-rs
//!
//! # Headless, custom thresholds
//! alarm-rs --headless -m cpu:70:90 -m available:15:30:inverted
//!
//! # Classify readings from another program
//! sensor-reader | alarm-rs --stdin -m temperature:40:50:20:10
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`source`]: Where readings come from (host or stdin)
//! - [`record`]: CSV rows and in-memory samples
//! - [`app`]: Main application state and coordination
//! - [`ui`]: Terminal user interface

mod app;
mod config;
mod record;
mod source;
mod ui;

use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::Config;

fn main() -> std::io::Result<()> {
    let config = Config::parse();

    // Check if stdout is a TTY - if not, force headless mode
    let use_headless = config.headless || !is_terminal();

    init_tracing(&config, use_headless)?;

    if !config.headless && !is_terminal() {
        tracing::warn!("stdout is not a TTY, running in headless mode");
    }

    let app = App::new(config.clone())?;

    // Setup Ctrl+C / SIGTERM handler
    let running = Arc::new(AtomicBool::new(true));
    setup_signal_handler(running.clone());

    let interval = Duration::from_secs(config.interval);

    if use_headless {
        ui::run_headless(app, running, interval)?;
    } else {
        ui::run(app, running, interval)?;
    }

    Ok(())
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to `--log-file` when given. Otherwise they go to stderr in
/// headless mode and are discarded under the TUI.
fn init_tracing(config: &Config, headless: bool) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "alarm_rs=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init();
    } else if headless {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::sink)).init();
    }

    Ok(())
}

/// Global flag for signal handler (must be static for signal safety).
static SIGNAL_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Set up signal handlers for graceful shutdown.
fn setup_signal_handler(running: Arc<AtomicBool>) {
    // Spawn a thread to monitor the signal flag and propagate to running
    let running_clone = running.clone();
    std::thread::spawn(move || {
        while running_clone.load(Ordering::Relaxed) {
            if SIGNAL_RECEIVED.load(Ordering::Relaxed) {
                running_clone.store(false, Ordering::Relaxed);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
    });

    unsafe {
        libc::signal(
            libc::SIGINT,
            signal_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGTERM,
            signal_handler as *const () as libc::sighandler_t,
        );
    }
}

/// Signal handler that sets the signal flag (async-signal-safe).
extern "C" fn signal_handler(_: i32) {
    SIGNAL_RECEIVED.store(true, Ordering::Relaxed);
}

/// Check if stdout is connected to a terminal.
fn is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}
