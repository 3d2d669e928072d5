//! Textual monitor descriptions.
//!
//! A [`MonitorSpec`] is written as
//!
//! ```text
//! name:upper_warning:upper_critical[:lower_warning:lower_critical][:inverted]
//! ```
//!
//! e.g. `cpu:80:95`, `temperature:40:50:20:10` or `available:10:20:inverted`.

use std::fmt;
use std::str::FromStr;

use crate::error::AlarmError;
use crate::monitor::ThresholdMonitor;
use crate::thresholds::Thresholds;

/// Name and thresholds of one monitor.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorSpec {
    pub name: String,
    pub thresholds: Thresholds,
}

impl MonitorSpec {
    pub fn new(name: impl Into<String>, thresholds: Thresholds) -> Self {
        Self {
            name: name.into(),
            thresholds,
        }
    }

    /// Build a named monitor from this description.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::EmptyName`] if the name is empty.
    pub fn build(&self) -> Result<ThresholdMonitor, AlarmError> {
        let mut monitor = ThresholdMonitor::new(self.thresholds);
        monitor.set_name(&self.name)?;
        Ok(monitor)
    }
}

impl FromStr for MonitorSpec {
    type Err = AlarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AlarmError::InvalidMonitorSpec(format!("'{s}': {reason}"));

        let mut parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let name = parts.remove(0);
        if name.is_empty() {
            return Err(invalid("missing name"));
        }

        let inverted = parts.last().is_some_and(|p| p.eq_ignore_ascii_case("inverted"));
        if inverted {
            parts.pop();
        }

        let limits = parts
            .iter()
            .map(|p| p.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;

        let mut thresholds = match limits.as_slice() {
            [uw, uc] => Thresholds::new(*uw, *uc),
            [uw, uc, lw, lc] => Thresholds::new(*uw, *uc).with_lower(*lw, *lc),
            _ => return Err(invalid("expected 2 or 4 thresholds")),
        };
        thresholds.inverted = inverted;

        Ok(Self::new(name, thresholds))
    }
}

impl fmt::Display for MonitorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.thresholds;
        write!(f, "{}:{}:{}", self.name, t.upper_warning, t.upper_critical)?;
        if t.lower_enabled() {
            write!(f, ":{}:{}", t.lower_warning, t.lower_critical)?;
        }
        if t.inverted {
            f.write_str(":inverted")?;
        }
        Ok(())
    }
}
