//! Application state and logic for alarm-rs.
//!
//! This module contains the main [`App`] struct which coordinates the
//! reading source, the monitors, logging, and the user interface.

use std::collections::{HashSet, VecDeque};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use alarm_rs::{AlarmError, Severity, ThresholdMonitor};

use crate::config::Config;
use crate::record::{Snapshot, StatusRecord};
use crate::source::{Reading, Source, StdinSource, SystemSource};

/// Main application state.
///
/// Holds configuration, monitors, sample history, and handles
/// coordination between the reading source and logging.
pub struct App {
    /// Application configuration from CLI
    pub config: Config,

    /// One monitor per configured spec, in CLI order
    pub monitors: Vec<ThresholdMonitor>,

    /// Historical samples for plotting
    pub history: VecDeque<Snapshot>,

    /// CSV writer for logging
    csv_writer: Option<csv::Writer<Box<dyn Write>>>,

    /// Where readings come from
    source: Box<dyn Source>,
}

impl App {
    /// Create a new application instance.
    ///
    /// This opens the CSV log, builds the monitors, and starts the
    /// configured reading source.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV file cannot be opened.
    pub fn new(config: Config) -> std::io::Result<Self> {
        // Initialize CSV writer (append mode, write header if new file)
        let csv_exists = Path::new(&config.csv_file).exists();
        let csv_file: File = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&config.csv_file)?;

        let csv_writer = csv::WriterBuilder::new()
            .has_headers(!csv_exists)
            .from_writer(Box::new(csv_file) as Box<dyn Write>);

        let source: Box<dyn Source> = if config.stdin {
            Box::new(StdinSource::spawn())
        } else {
            Box::new(SystemSource::new())
        };

        Self::with_parts(config, source, Some(csv_writer))
    }

    /// Assemble an application from an explicit source and log writer.
    ///
    /// # Errors
    ///
    /// Returns an error if two monitors share a name, since readings are
    /// routed to monitors by name.
    pub fn with_parts(
        config: Config,
        source: Box<dyn Source>,
        csv_writer: Option<csv::Writer<Box<dyn Write>>>,
    ) -> std::io::Result<Self> {
        let mut monitors = Vec::new();
        let mut names = HashSet::new();
        for spec in config.monitor_specs() {
            if !names.insert(spec.name.clone()) {
                return Err(std::io::Error::other(AlarmError::InvalidMonitorSpec(format!(
                    "'{spec}': duplicate monitor name '{}'",
                    spec.name
                ))));
            }
            let mut monitor = spec.build().map_err(std::io::Error::other)?;
            if let Some(unit) = source.unit(&spec.name) {
                monitor.set_unit(unit).map_err(std::io::Error::other)?;
            }
            tracing::info!(monitor = %spec, "monitor configured");
            monitors.push(monitor);
        }

        let history_size = config.history_size;

        Ok(Self {
            config,
            monitors,
            history: VecDeque::with_capacity(history_size),
            csv_writer,
            source,
        })
    }

    /// Read every monitor's input and re-evaluate it.
    ///
    /// Numeric readings go through [`ThresholdMonitor::check`]. A
    /// sensor that cannot be read is forced to Unknown, and a forced
    /// code from the source is applied with
    /// [`ThresholdMonitor::force_check`] (invalid codes keep the
    /// previous status). Monitors without new input are left alone.
    ///
    /// # Returns
    ///
    /// The snapshot of all monitors after this sample.
    pub fn sample(&mut self) -> std::io::Result<Snapshot> {
        let now = Utc::now();
        let timestamp = now.timestamp();
        let datetime = now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

        self.source.refresh();

        let mut records = Vec::with_capacity(self.monitors.len());
        for (index, monitor) in self.monitors.iter_mut().enumerate() {
            let value = match self.source.read(monitor.name()) {
                Some(Reading::Value(v)) => {
                    monitor.check(v);
                    Some(v)
                }
                Some(Reading::Unavailable) => {
                    monitor.force(Severity::Unknown);
                    None
                }
                Some(Reading::Forced(code)) => {
                    if let Err(e) = monitor.force_check(code) {
                        tracing::warn!(monitor = monitor.name(), error = %e, "ignoring forced status");
                    }
                    None
                }
                None => continue,
            };
            records.push(StatusRecord::new(index, timestamp, &datetime, monitor, value));
        }

        let snapshot = Snapshot {
            datetime,
            records,
        };

        // Log to CSV
        self.log_records(&snapshot)?;

        Ok(snapshot)
    }

    /// Add a snapshot to history, maintaining max size.
    pub fn push_history(&mut self, snapshot: Snapshot) {
        if self.history.len() >= self.config.history_size.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    /// Log records to CSV file.
    fn log_records(&mut self, snapshot: &Snapshot) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.csv_writer {
            for record in &snapshot.records {
                writer.serialize(record).map_err(std::io::Error::other)?;
            }
            writer.flush()?;
        }
        Ok(())
    }
}
