//! # alarm-rs
//!
//! Threshold alarms for numeric sensor readings.
//!
//! ## Overview
//!
//! A [`ThresholdMonitor`] classifies each reading it is given into a
//! [`Severity`]: OK, Warning, Critical or Unknown. Classification uses
//! an upper warning/critical pair, an optional lower pair and an
//! optional polarity inversion for metrics where a high value is good
//! (remaining capacity, free memory).
//!
//! ```
//! use alarm_rs::{Severity, ThresholdMonitor, Thresholds};
//!
//! let mut temperature =
//!     ThresholdMonitor::new(Thresholds::new(40.0, 50.0).with_lower(20.0, 10.0));
//!
//! assert_eq!(temperature.check(10.0), Severity::Critical);
//! assert_eq!(temperature.check(20.0), Severity::Warning);
//! assert_eq!(temperature.check(30.0), Severity::Ok);
//! assert_eq!(temperature.check(50.0), Severity::Critical);
//!
//! // Sensor fault: report Unknown without inventing a reading.
//! temperature.force(Severity::Unknown);
//! assert_eq!(temperature.status_name(), "Unknown");
//! ```
//!
//! ## Module Organization
//!
//! - [`severity`]: severity levels and their codes
//! - [`thresholds`]: threshold configuration and classification
//! - [`monitor`]: the stateful monitor
//! - [`monitor_spec`]: `name:warn:crit[...]` monitor descriptions
//! - [`error`]: error type

pub mod error;
pub mod monitor;
pub mod monitor_spec;
pub mod severity;
pub mod thresholds;

pub use error::AlarmError;
pub use monitor::ThresholdMonitor;
pub use monitor_spec::MonitorSpec;
pub use severity::Severity;
pub use thresholds::Thresholds;
