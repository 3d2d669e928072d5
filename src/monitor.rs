//! The threshold monitor.
//!
//! A [`ThresholdMonitor`] holds one [`Thresholds`] configuration, the
//! last value passed to [`check`](ThresholdMonitor::check) and the last
//! computed [`Severity`]. It has no history: every `check` is a pure
//! function of the configuration and the new value.
//!
//! # Example
//!
//! ```
//! use alarm_rs::{Severity, ThresholdMonitor, Thresholds};
//!
//! let mut speed = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
//! speed.set_name("Speed").unwrap();
//! speed.set_unit(" k/h").unwrap();
//!
//! assert_eq!(speed.check(39.0), Severity::Ok);
//! assert_eq!(speed.check(40.0), Severity::Warning);
//! assert_eq!(speed.to_string(), "Speed: 40 k/h (Warning)");
//! ```

use std::fmt;

use crate::error::AlarmError;
use crate::severity::Severity;
use crate::thresholds::Thresholds;

/// Stateful classifier for a single reading source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThresholdMonitor {
    thresholds: Thresholds,
    value: f64,
    status: Severity,
    name: String,
    unit: String,
}

impl ThresholdMonitor {
    /// Create a monitor. Status starts as [`Severity::Unknown`] and the
    /// value as 0.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Replace all thresholds and the polarity.
    ///
    /// Name, unit, last value and status are left untouched.
    pub fn set(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    /// Classify a new reading, store it and return the resulting status.
    pub fn check(&mut self, value: f64) -> Severity {
        self.value = value;
        let status = self.thresholds.classify(value);
        if status != self.status {
            tracing::debug!(
                monitor = %self.name,
                value,
                from = %self.status,
                to = %status,
                "status changed"
            );
        }
        self.status = status;
        status
    }

    /// Overwrite the status with a numeric code, bypassing thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::InvalidSeverity`] if `code` is not in
    /// `0..=3`; the status is left unchanged.
    pub fn force_check(&mut self, code: u8) -> Result<(), AlarmError> {
        match Severity::from_code(code) {
            Ok(status) => {
                self.force(status);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(monitor = %self.name, code, "rejected forced status");
                Err(e)
            }
        }
    }

    /// Overwrite the status, bypassing thresholds.
    pub fn force(&mut self, status: Severity) {
        tracing::debug!(monitor = %self.name, %status, "status forced");
        self.status = status;
    }

    /// Last computed or forced status.
    pub fn status(&self) -> Severity {
        self.status
    }

    /// Display label of the current status.
    pub fn status_name(&self) -> &'static str {
        self.status.name()
    }

    /// Last value passed to [`check`](Self::check).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current threshold configuration.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Upper warning threshold.
    pub fn upper_warning(&self) -> f64 {
        self.thresholds.upper_warning
    }

    /// Upper critical threshold.
    pub fn upper_critical(&self) -> f64 {
        self.thresholds.upper_critical
    }

    /// Lower warning threshold.
    pub fn lower_warning(&self) -> f64 {
        self.thresholds.lower_warning
    }

    /// Lower critical threshold.
    pub fn lower_critical(&self) -> f64 {
        self.thresholds.lower_critical
    }

    /// Whether OK and Critical are swapped.
    pub fn is_inverted(&self) -> bool {
        self.thresholds.inverted
    }

    /// Monitor name, empty if never set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the monitor name.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::EmptyName`] for an empty string.
    pub fn set_name(&mut self, name: &str) -> Result<(), AlarmError> {
        if name.is_empty() {
            return Err(AlarmError::EmptyName);
        }
        self.name = name.to_owned();
        Ok(())
    }

    /// Unit suffix, empty if never set.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Set the unit suffix (printed right after the value).
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::EmptyUnit`] for an empty string.
    pub fn set_unit(&mut self, unit: &str) -> Result<(), AlarmError> {
        if unit.is_empty() {
            return Err(AlarmError::EmptyUnit);
        }
        self.unit = unit.to_owned();
        Ok(())
    }
}

impl fmt::Display for ThresholdMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}{} ({})",
            self.name,
            self.value,
            self.unit,
            self.status_name()
        )
    }
}
