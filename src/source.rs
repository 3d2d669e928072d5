//! Reading sources for alarm-rs.
//!
//! A [`Source`] supplies the value for each monitor at every sample:
//!
//! - [`SystemSource`]: CPU, memory, swap and load average of the local
//!   host, read through `sysinfo`
//! - [`StdinSource`]: `<name> <value>` lines from standard input, read on
//!   a background thread

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, Sender};

use sysinfo::{LoadAvg, System};

/// What a source has to say about one monitor at one sample.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Reading {
    /// A numeric reading to classify
    Value(f64),
    /// The sensor exists but cannot be read right now
    Unavailable,
    /// A status code decided outside the monitor
    Forced(u8),
}

/// Supplier of readings.
pub trait Source {
    /// Take a fresh snapshot of the underlying data.
    fn refresh(&mut self);

    /// Reading for `name`, or `None` if there is nothing new for it.
    fn read(&mut self, name: &str) -> Option<Reading>;

    /// Unit suffix for `name`, if the source knows one.
    fn unit(&self, _name: &str) -> Option<&'static str> {
        None
    }
}

/// Metrics of the local host.
///
/// Known names: `cpu`, `memory`, `swap`, `available` (all in percent)
/// and `load1`, `load5`, `load15`. Other names read as unavailable.
pub struct SystemSource {
    sys: System,
    load: LoadAvg,
}

impl SystemSource {
    pub fn new() -> Self {
        Self {
            sys: System::new_all(),
            load: System::load_average(),
        }
    }

    fn percent(part: u64, total: u64) -> Option<f64> {
        (total > 0).then(|| part as f64 / total as f64 * 100.0)
    }

    fn value(&self, name: &str) -> Option<f64> {
        match name {
            "cpu" => {
                let cpus = self.sys.cpus();
                (!cpus.is_empty()).then(|| {
                    cpus.iter().map(|c| c.cpu_usage() as f64).sum::<f64>() / cpus.len() as f64
                })
            }
            "memory" => Self::percent(self.sys.used_memory(), self.sys.total_memory()),
            "available" => Self::percent(self.sys.available_memory(), self.sys.total_memory()),
            // No swap configured reads as unavailable, not as 0%.
            "swap" => Self::percent(self.sys.used_swap(), self.sys.total_swap()),
            "load1" => Some(self.load.one),
            "load5" => Some(self.load.five),
            "load15" => Some(self.load.fifteen),
            _ => None,
        }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for SystemSource {
    fn refresh(&mut self) {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.load = System::load_average();
    }

    fn read(&mut self, name: &str) -> Option<Reading> {
        Some(self.value(name).map_or(Reading::Unavailable, Reading::Value))
    }

    fn unit(&self, name: &str) -> Option<&'static str> {
        match name {
            "cpu" | "memory" | "swap" | "available" => Some("%"),
            _ => None,
        }
    }
}

/// Readings pushed line by line on standard input.
///
/// Only the latest reading per name since the previous sample is kept.
/// Monitors with no new line keep their previous status.
pub struct StdinSource {
    rx: Receiver<(String, Reading)>,
    pending: HashMap<String, Reading>,
}

impl StdinSource {
    /// Start reading standard input on a background thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || feed_lines(std::io::stdin().lock(), tx));
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: Receiver<(String, Reading)>) -> Self {
        Self {
            rx,
            pending: HashMap::new(),
        }
    }
}

impl Source for StdinSource {
    fn refresh(&mut self) {
        while let Ok((name, reading)) = self.rx.try_recv() {
            self.pending.insert(name, reading);
        }
    }

    fn read(&mut self, name: &str) -> Option<Reading> {
        self.pending.remove(name)
    }
}

/// Parse lines from `reader` and send them until EOF or until the
/// receiving side is gone.
pub fn feed_lines<R: BufRead>(reader: R, tx: Sender<(String, Reading)>) {
    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "stopped reading input");
                return;
            }
        };
        match parse_line(&line) {
            Some(Ok(entry)) => {
                if tx.send(entry).is_err() {
                    return;
                }
            }
            Some(Err(reason)) => {
                tracing::warn!(line = lineno + 1, %reason, "skipping malformed input line");
            }
            None => {}
        }
    }
    tracing::info!("input closed");
}

/// Parse one input line.
///
/// `<name> <value>` is a reading, `<name> force <code>` a forced status.
/// Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<Result<(String, Reading), String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let parsed = match fields.as_slice() {
        [name, "force", code] => code
            .parse::<u8>()
            .map(|c| (name.to_string(), Reading::Forced(c)))
            .map_err(|e| format!("bad status code '{code}': {e}")),
        [name, value] => value
            .parse::<f64>()
            .map(|v| (name.to_string(), Reading::Value(v)))
            .map_err(|e| format!("bad value '{value}': {e}")),
        _ => Err(format!("expected '<name> <value>', got '{line}'")),
    };
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_values_and_forced_codes() {
        assert_eq!(
            parse_line("temperature 21.5"),
            Some(Ok(("temperature".to_string(), Reading::Value(21.5))))
        );
        assert_eq!(
            parse_line("  speed   -3 "),
            Some(Ok(("speed".to_string(), Reading::Value(-3.0))))
        );
        assert_eq!(
            parse_line("speed force 3"),
            Some(Ok(("speed".to_string(), Reading::Forced(3))))
        );
        // Out-of-range codes are the monitor's call, not the parser's.
        assert_eq!(
            parse_line("speed force 99"),
            Some(Ok(("speed".to_string(), Reading::Forced(99))))
        );
    }

    #[test]
    fn skip_blank_and_comments() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# speed 10"), None);
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(parse_line("speed"), Some(Err(_))));
        assert!(matches!(parse_line("speed fast"), Some(Err(_))));
        assert!(matches!(parse_line("speed force -1"), Some(Err(_))));
        assert!(matches!(parse_line("a b c d"), Some(Err(_))));
    }

    #[test]
    fn stdin_source_keeps_latest_per_name() {
        let (tx, rx) = mpsc::channel();
        feed_lines(Cursor::new("speed 10\nbogus\nspeed 30\ntemp force 3\n"), tx);

        let mut source = StdinSource::from_receiver(rx);
        source.refresh();
        assert_eq!(source.read("speed"), Some(Reading::Value(30.0)));
        assert_eq!(source.read("temp"), Some(Reading::Forced(3)));
        // consumed
        assert_eq!(source.read("speed"), None);
        assert_eq!(source.read("other"), None);
    }

    #[test]
    fn system_units() {
        let source = SystemSource::new();
        assert_eq!(source.unit("cpu"), Some("%"));
        assert_eq!(source.unit("load1"), None);
    }

    #[test]
    fn unknown_system_metric_is_unavailable() {
        let mut source = SystemSource::new();
        source.refresh();
        assert_eq!(source.read("fan_rpm"), Some(Reading::Unavailable));
        assert!(matches!(source.read("load1"), Some(Reading::Value(_))));
    }
}
