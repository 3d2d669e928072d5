//! Threshold definitions for alarm-rs.
//!
//! A [`Thresholds`] value holds the upper and lower warning/critical
//! limits of one monitor plus its polarity, and knows how to classify a
//! value against them.
//!
//! Lower thresholds are disabled when `lower_warning == lower_critical`.
//! Both default to 0, so a monitor built from upper limits alone never
//! runs the lower-bound check.

use crate::severity::Severity;

/// Threshold configuration for a single monitor.
///
/// No validation is performed: a warning limit above its critical limit
/// is accepted, and evaluation simply checks critical before warning on
/// each bound.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Thresholds {
    /// Upper warning threshold (value >= this is a warning)
    pub upper_warning: f64,
    /// Upper critical threshold (value >= this is critical)
    pub upper_critical: f64,
    /// Lower warning threshold (value <= this is a warning)
    pub lower_warning: f64,
    /// Lower critical threshold (value <= this is critical)
    pub lower_critical: f64,
    /// Swap OK and Critical results ("high value is good")
    pub inverted: bool,
}

impl Thresholds {
    /// Upper limits only; lower bound disabled, normal polarity.
    pub fn new(upper_warning: f64, upper_critical: f64) -> Self {
        Self {
            upper_warning,
            upper_critical,
            ..Self::default()
        }
    }

    /// Set the lower limits.
    pub fn with_lower(mut self, lower_warning: f64, lower_critical: f64) -> Self {
        self.lower_warning = lower_warning;
        self.lower_critical = lower_critical;
        self
    }

    /// Invert the polarity.
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Whether the lower-bound check runs.
    pub fn lower_enabled(&self) -> bool {
        self.lower_warning != self.lower_critical
    }

    /// Classify `value`.
    ///
    /// Upper bound first, then the lower bound (when enabled) overrides
    /// the result if it triggers, then polarity inversion. The result is
    /// never [`Severity::Unknown`].
    pub fn classify(&self, value: f64) -> Severity {
        let mut severity = if value >= self.upper_critical {
            Severity::Critical
        } else if value >= self.upper_warning {
            Severity::Warning
        } else {
            Severity::Ok
        };

        if self.lower_enabled() {
            if value <= self.lower_critical {
                severity = Severity::Critical;
            } else if value <= self.lower_warning {
                severity = Severity::Warning;
            }
        }

        if self.inverted {
            severity = severity.invert();
        }

        severity
    }
}
