//! Command-line configuration for alarm-rs.
//!
//! This module defines all CLI arguments using `clap` for parsing.
//! The configuration controls the sampling interval, the monitors and
//! their thresholds, the reading source, output files and display mode.

use clap::Parser;

use alarm_rs::MonitorSpec;

/// Monitors used when no `--monitor` is given.
pub const DEFAULT_MONITORS: &[&str] = &[
    "cpu:80:95",
    "memory:85:95",
    "swap:50:80",
    "available:10:20:inverted",
    "load1:4:8",
];

/// Threshold alarms for host and sensor readings.
///
/// alarm-rs samples readings at a fixed interval and classifies each
/// one as OK, Warning, Critical or Unknown against its monitor's
/// thresholds. Readings come either from the local host (CPU, memory,
/// swap, load) or from standard input.
///
/// # Examples
///
/// ```bash
/// # Watch the host with the default monitors
/// alarm-rs
///
/// # Custom thresholds, headless, 10-second interval
/// alarm-rs --headless -i 10 -m cpu:70:90 -m available:15:30:inverted
///
/// # Classify readings piped in as "<name> <value>" lines
/// sensor-reader | alarm-rs --stdin -m temperature:40:50:20:10
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Classify sensor readings against warning and critical thresholds")]
pub struct Config {
    /// Interval in seconds between samples.
    #[arg(short, long, default_value_t = 5)]
    pub interval: u64,

    /// Monitor definition, repeatable.
    ///
    /// Format: `name:upper_warning:upper_critical[:lower_warning:lower_critical][:inverted]`.
    /// Lower thresholds are disabled when omitted or equal. `inverted`
    /// swaps OK and Critical, for metrics where high values are good.
    #[arg(short, long = "monitor", value_name = "SPEC")]
    pub monitors: Vec<MonitorSpec>,

    /// Read `<name> <value>` (or `<name> force <code>`) lines from stdin
    /// instead of sampling the local host.
    #[arg(long)]
    pub stdin: bool,

    /// Path to CSV log file.
    ///
    /// Every evaluation is appended to this file. The file is created if
    /// it doesn't exist (headers are only written once).
    #[arg(short = 'c', long, default_value = "alarms.csv")]
    pub csv_file: String,

    /// Number of samples kept in memory for plotting.
    #[arg(long, default_value_t = 120)]
    pub history_size: usize,

    /// Run in headless mode (no TUI, just one line per monitor).
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Config {
    /// Configured monitors, or the defaults when none were given.
    pub fn monitor_specs(&self) -> Vec<MonitorSpec> {
        if !self.monitors.is_empty() {
            return self.monitors.clone();
        }
        DEFAULT_MONITORS
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = Config::parse_from(["alarm-rs"]);
        let specs = config.monitor_specs();
        assert_eq!(specs.len(), DEFAULT_MONITORS.len());
        assert_eq!(specs[3].name, "available");
        assert!(specs[3].thresholds.inverted);
        assert_eq!(config.interval, 5);
        assert!(!config.stdin);
    }

    #[test]
    fn explicit_monitors_replace_defaults() {
        let config = Config::parse_from([
            "alarm-rs",
            "--stdin",
            "-m",
            "speed:40:60",
            "--monitor",
            "temperature:40:50:20:10",
        ]);
        let specs = config.monitor_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "speed");
        assert!(specs[1].thresholds.lower_enabled());
    }

    #[test]
    fn bad_monitor_is_a_usage_error() {
        assert!(Config::try_parse_from(["alarm-rs", "-m", "speed:40"]).is_err());
    }
}
