//! Severity levels produced by threshold monitors.
//!
//! A [`Severity`] is the classification result of one evaluation. The
//! numeric codes (0 = OK, 1 = Warning, 2 = Critical, 3 = Unknown) are
//! stable and are what callers pass to
//! [`ThresholdMonitor::force_check`](crate::ThresholdMonitor::force_check)
//! when a status is decided outside the monitor.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::AlarmError;

/// Severity level of a reading.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Severity {
    /// Within normal operating range
    Ok,
    /// Approaching problematic levels
    Warning,
    /// Critical - immediate attention needed
    Critical,
    /// No evaluation yet, or the reading source is unavailable
    #[default]
    Unknown,
}

impl Severity {
    /// All severities in code order.
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Warning,
        Severity::Critical,
        Severity::Unknown,
    ];

    /// Convert a numeric status code into a severity.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::InvalidSeverity`] for codes above 3.
    pub fn from_code(code: u8) -> Result<Self, AlarmError> {
        match code {
            0 => Ok(Severity::Ok),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Critical),
            3 => Ok(Severity::Unknown),
            other => Err(AlarmError::InvalidSeverity(other)),
        }
    }

    /// Numeric status code.
    pub fn code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// Display label.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
            Severity::Unknown => "Unknown",
        }
    }

    /// Swap OK and Critical. Warning and Unknown are left as they are.
    pub fn invert(self) -> Self {
        match self {
            Severity::Ok => Severity::Critical,
            Severity::Critical => Severity::Ok,
            other => other,
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = AlarmError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Severity::from_code(code)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
