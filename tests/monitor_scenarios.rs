use alarm_rs::{AlarmError, Severity, ThresholdMonitor, Thresholds};
use assert_matches::assert_matches;

fn assert_table(monitor: &mut ThresholdMonitor, table: &[(f64, Severity)]) {
    for &(value, expected) in table {
        assert_eq!(monitor.check(value), expected, "check({value})");
        assert_eq!(monitor.status(), expected);
        assert_eq!(monitor.value(), value);
    }
}

#[test]
fn speed_upper_only() {
    let mut speed = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
    speed.set_name("Speed").unwrap();
    speed.set_unit(" k/h").unwrap();

    assert_table(
        &mut speed,
        &[
            (30.0, Severity::Ok),
            (39.0, Severity::Ok),
            (40.0, Severity::Warning),
            (59.0, Severity::Warning),
            (60.0, Severity::Critical),
            (70.0, Severity::Critical),
        ],
    );
    assert_eq!(speed.to_string(), "Speed: 70 k/h (Critical)");
}

#[test]
fn temperature_with_lower_bound() {
    let mut temperature =
        ThresholdMonitor::new(Thresholds::new(40.0, 50.0).with_lower(20.0, 10.0));

    assert_table(
        &mut temperature,
        &[
            (0.0, Severity::Critical),
            (10.0, Severity::Critical),
            (11.0, Severity::Warning),
            (20.0, Severity::Warning),
            (21.0, Severity::Ok),
            (39.0, Severity::Ok),
            (40.0, Severity::Warning),
            (49.0, Severity::Warning),
            (50.0, Severity::Critical),
            (60.0, Severity::Critical),
        ],
    );
}

#[test]
fn length_inverted() {
    let mut length =
        ThresholdMonitor::new(Thresholds::new(40.0, 50.0).with_lower(20.0, 10.0).inverted());

    assert_table(
        &mut length,
        &[
            (0.0, Severity::Ok),
            (10.0, Severity::Ok),
            (11.0, Severity::Warning),
            (20.0, Severity::Warning),
            (21.0, Severity::Critical),
            (39.0, Severity::Critical),
            (40.0, Severity::Warning),
            (49.0, Severity::Warning),
            (50.0, Severity::Ok),
            (60.0, Severity::Ok),
        ],
    );
}

#[test]
fn out_of_range_force_keeps_status() {
    let mut monitor = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
    assert_matches!(monitor.force_check(99), Err(AlarmError::InvalidSeverity(99)));
    assert_eq!(monitor.status(), Severity::Unknown);

    monitor.check(60.0);
    assert_matches!(monitor.force_check(99), Err(AlarmError::InvalidSeverity(99)));
    assert_eq!(monitor.status(), Severity::Critical);

    assert!(monitor.force_check(3).is_ok());
    assert_eq!(monitor.status_name(), "Unknown");
}

#[test]
fn empty_name_keeps_previous() {
    let mut monitor = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
    assert!(monitor.set_name("").is_err());
    assert_eq!(monitor.name(), "");

    monitor.set_name("Speed").unwrap();
    assert!(monitor.set_name("").is_err());
    assert_eq!(monitor.name(), "Speed");
}

const SWEEP: [f64; 13] = [
    -100.0, -1.0, 0.0, 9.5, 10.0, 15.0, 20.0, 20.5, 39.9, 40.0, 45.0, 50.0, 1000.0,
];

fn configurations() -> Vec<Thresholds> {
    vec![
        Thresholds::new(40.0, 60.0),
        Thresholds::new(40.0, 50.0).with_lower(20.0, 10.0),
        Thresholds::new(40.0, 50.0).with_lower(10.0, 20.0),
        Thresholds::new(50.0, 40.0).with_lower(15.0, 15.0),
        Thresholds::new(-5.0, 0.0).with_lower(-20.0, -30.0),
    ]
}

#[test]
fn disabled_lower_bound_matches_upper_only() {
    for lower in [0.0, 15.0, -7.5] {
        let mut with_equal_lower =
            ThresholdMonitor::new(Thresholds::new(40.0, 50.0).with_lower(lower, lower));
        let mut upper_only = ThresholdMonitor::new(Thresholds::new(40.0, 50.0));
        for value in SWEEP {
            assert_eq!(with_equal_lower.check(value), upper_only.check(value));
        }
    }
}

#[test]
fn check_is_idempotent() {
    for thresholds in configurations() {
        let mut monitor = ThresholdMonitor::new(thresholds);
        for value in SWEEP {
            let first = monitor.check(value);
            assert_eq!(monitor.check(value), first);
        }
    }
}

#[test]
fn escalation_is_monotonic() {
    let mut monitor = ThresholdMonitor::new(Thresholds::new(40.0, 50.0).with_lower(20.0, 10.0));

    let rank = |s: Severity| match s {
        Severity::Ok => 0,
        Severity::Warning => 1,
        Severity::Critical => 2,
        Severity::Unknown => unreachable!(),
    };

    // Rising from the OK band through the upper limits never de-escalates.
    let mut last = 0;
    for value in (21..=80).map(f64::from) {
        let r = rank(monitor.check(value));
        assert!(r >= last, "de-escalated at {value}");
        last = r;
    }
    assert_eq!(last, 2);

    // Falling from the OK band through the lower limits never de-escalates.
    let mut last = 0;
    for value in (-20..=39).rev().map(f64::from) {
        let r = rank(monitor.check(value));
        assert!(r >= last, "de-escalated at {value}");
        last = r;
    }
    assert_eq!(last, 2);
}

#[test]
fn inversion_law() {
    for thresholds in configurations() {
        let mut normal = ThresholdMonitor::new(thresholds);
        let mut inverted = ThresholdMonitor::new(thresholds.inverted());
        for value in SWEEP {
            let expected = match normal.check(value) {
                Severity::Ok => Severity::Critical,
                Severity::Critical => Severity::Ok,
                other => other,
            };
            assert_eq!(inverted.check(value), expected, "{thresholds:?} at {value}");
        }
    }
}

#[test]
fn check_never_yields_unknown() {
    for thresholds in configurations() {
        let mut monitor = ThresholdMonitor::new(thresholds.inverted());
        for value in SWEEP {
            assert_ne!(monitor.check(value), Severity::Unknown);
        }
    }
}

#[test]
fn status_name_is_total() {
    let mut monitor = ThresholdMonitor::new(Thresholds::new(40.0, 60.0));
    for code in 0..=3 {
        monitor.force_check(code).unwrap();
        assert!(["OK", "Warning", "Critical", "Unknown"].contains(&monitor.status_name()));
    }
}
