//! Evaluation records for alarm-rs.
//!
//! This module defines the [`StatusRecord`] written to the CSV log for
//! every monitor at every sample, and the [`Snapshot`] of one sample
//! kept in memory for the UI.

use serde::Serialize;

use alarm_rs::{Severity, ThresholdMonitor};

/// One monitor's state after one sample.
///
/// This struct is serialized to CSV for logging.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StatusRecord {
    /// Position of the monitor in the app's monitor list
    #[serde(skip)]
    pub index: usize,
    /// Unix timestamp (seconds since epoch)
    pub timestamp: i64,
    /// ISO 8601 formatted datetime string
    pub datetime: String,
    /// Monitor name
    pub name: String,
    /// Reading that was classified (None if the status was forced)
    pub value: Option<f64>,
    /// Unit suffix of the reading
    pub unit: String,
    /// Status display name
    pub status: Severity,
    /// Numeric status code
    pub code: u8,
}

impl StatusRecord {
    pub fn new(
        index: usize,
        timestamp: i64,
        datetime: &str,
        monitor: &ThresholdMonitor,
        value: Option<f64>,
    ) -> Self {
        Self {
            index,
            timestamp,
            datetime: datetime.to_string(),
            name: monitor.name().to_string(),
            value,
            unit: monitor.unit().to_string(),
            status: monitor.status(),
            code: monitor.status().code(),
        }
    }
}

/// All monitors after one sample.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub datetime: String,
    pub records: Vec<StatusRecord>,
}

impl Snapshot {
    /// Most urgent status across monitors.
    ///
    /// Critical, then Unknown, then Warning, then OK. An empty snapshot
    /// is Unknown.
    pub fn worst(&self) -> Severity {
        self.records
            .iter()
            .map(|r| r.status)
            .max_by_key(|s| urgency(*s))
            .unwrap_or(Severity::Unknown)
    }

    /// Number of monitors with the given status.
    pub fn count(&self, status: Severity) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Value recorded for the monitor at `index`, if it was classified
    /// in this sample.
    pub fn value_of(&self, index: usize) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.index == index)
            .and_then(|r| r.value)
    }
}

fn urgency(status: Severity) -> u8 {
    match status {
        Severity::Ok => 0,
        Severity::Warning => 1,
        Severity::Unknown => 2,
        Severity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarm_rs::Thresholds;

    fn record(index: usize, name: &str, status: Severity, value: Option<f64>) -> StatusRecord {
        StatusRecord {
            index,
            timestamp: 0,
            datetime: String::new(),
            name: name.to_string(),
            value,
            unit: String::new(),
            status,
            code: status.code(),
        }
    }

    #[test]
    fn worst_prefers_critical_then_unknown() {
        let mut snapshot = Snapshot {
            records: vec![
                record(0, "a", Severity::Ok, Some(1.0)),
                record(1, "b", Severity::Warning, Some(2.0)),
            ],
            ..Snapshot::default()
        };
        assert_eq!(snapshot.worst(), Severity::Warning);

        snapshot.records.push(record(2, "c", Severity::Unknown, None));
        assert_eq!(snapshot.worst(), Severity::Unknown);

        snapshot.records.push(record(3, "d", Severity::Critical, Some(9.0)));
        assert_eq!(snapshot.worst(), Severity::Critical);
        assert_eq!(snapshot.count(Severity::Ok), 1);
        assert_eq!(snapshot.value_of(1), Some(2.0));
        assert_eq!(snapshot.value_of(2), None);
    }

    #[test]
    fn empty_snapshot_is_unknown() {
        assert_eq!(Snapshot::default().worst(), Severity::Unknown);
    }

    #[test]
    fn csv_row_uses_status_name() {
        let mut monitor = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
        monitor.set_name("speed").unwrap();
        monitor.set_unit("km/h").unwrap();
        monitor.check(45.0);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .serialize(StatusRecord::new(0, 1, "1970-01-01T00:00:01.000Z", &monitor, Some(45.0)))
            .unwrap();
        let bytes = writer.into_inner().ok().unwrap();
        let out = String::from_utf8(bytes).unwrap();

        assert_eq!(
            out,
            "timestamp,datetime,name,value,unit,status,code\n\
             1,1970-01-01T00:00:01.000Z,speed,45.0,km/h,Warning,1\n"
        );
    }
}
