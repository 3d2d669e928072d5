//! Terminal User Interface for alarm-rs.
//!
//! This module provides a real-time dashboard using `ratatui` that displays:
//!
//! - Status bar with the worst current status and sample count
//! - A table of all monitors, colored by severity
//! - A chart of the selected monitor's recent values with its thresholds
//!
//! # Controls
//!
//! - `q` or `Esc`: Quit
//! - `Up`/`Down`: Select monitor

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame, Terminal,
};

use alarm_rs::{Severity, ThresholdMonitor};

use crate::app::App;

/// Run the TUI event loop.
///
/// This takes ownership of the App and terminal, running until the user
/// presses `q` or `Esc`, or the `running` flag is set to false.
///
/// # Arguments
///
/// * `app` - Application instance
/// * `running` - Atomic flag to signal shutdown
/// * `interval` - Time between samples
pub fn run(mut app: App, running: Arc<AtomicBool>, interval: Duration) -> std::io::Result<()> {
    enable_raw_mode()?;
    if let Err(e) = std::io::stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let result = run_tui_loop(&mut app, &running, interval);

    // Always clean up terminal state
    let _ = disable_raw_mode();
    let _ = std::io::stdout().execute(LeaveAlternateScreen);

    result
}

/// Inner TUI loop - separated to ensure cleanup happens on any exit path.
fn run_tui_loop(app: &mut App, running: &Arc<AtomicBool>, interval: Duration) -> std::io::Result<()> {
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut last_sample = Instant::now();
    let mut selected = 0usize;

    // Initial sample
    sample_into_history(app);

    while running.load(Ordering::Relaxed) {
        // Check for input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            running.store(false, Ordering::Relaxed);
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            running.store(false, Ordering::Relaxed);
                        }
                        KeyCode::Up => {
                            selected = selected.saturating_sub(1);
                        }
                        KeyCode::Down => {
                            selected = (selected + 1).min(app.monitors.len().saturating_sub(1));
                        }
                        _ => {}
                    }
                }
            }
        }

        // Sample at interval
        if last_sample.elapsed() >= interval {
            sample_into_history(app);
            last_sample = Instant::now();
        }

        // Draw UI
        terminal.draw(|f| draw_ui(f, app, selected))?;
    }

    Ok(())
}

fn sample_into_history(app: &mut App) {
    match app.sample() {
        Ok(snapshot) => app.push_history(snapshot),
        Err(e) => tracing::error!(error = %e, "sample failed"),
    }
}

/// Foreground color for a status.
fn severity_color(status: Severity) -> Color {
    match status {
        Severity::Ok => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
        Severity::Unknown => Color::Gray,
    }
}

/// Main UI drawing function.
fn draw_ui(f: &mut Frame, app: &App, selected: usize) {
    let table_height = app.monitors.len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(table_height),
            Constraint::Min(8),
        ])
        .split(f.area());

    draw_status_bar(f, app, chunks[0]);
    draw_monitor_table(f, &app.monitors, selected, chunks[1]);
    if let Some(monitor) = app.monitors.get(selected) {
        draw_value_chart(f, app, selected, monitor, chunks[2]);
    }
}

/// Draw the top status bar.
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (status_text, worst) = if let Some(s) = app.history.back() {
        (
            format!(
                " 🚨 alarm-rs | {} | Worst: {} | OK: {} Warn: {} Crit: {} Unknown: {} | Samples: {} | [q]uit",
                s.datetime,
                s.worst(),
                s.count(Severity::Ok),
                s.count(Severity::Warning),
                s.count(Severity::Critical),
                s.count(Severity::Unknown),
                app.history.len()
            ),
            s.worst(),
        )
    } else {
        (
            " 🚨 alarm-rs | Waiting for readings... | [q]uit".to_string(),
            Severity::Unknown,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Status")
                .border_style(Style::default().fg(severity_color(worst))),
        );

    f.render_widget(status, area);
}

/// Format the threshold columns of a monitor.
fn threshold_text(monitor: &ThresholdMonitor) -> (String, String) {
    let upper = format!("{} / {}", monitor.upper_warning(), monitor.upper_critical());
    let lower = if monitor.thresholds().lower_enabled() {
        format!("{} / {}", monitor.lower_warning(), monitor.lower_critical())
    } else {
        "-".to_string()
    };
    (upper, lower)
}

/// Draw the monitor table.
fn draw_monitor_table(f: &mut Frame, monitors: &[ThresholdMonitor], selected: usize, area: Rect) {
    let header = Row::new(["Monitor", "Value", "Upper W/C", "Lower W/C", "Polarity", "Status"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows = monitors.iter().enumerate().map(|(i, m)| {
        let (upper, lower) = threshold_text(m);
        let status_style = Style::default()
            .fg(severity_color(m.status()))
            .add_modifier(if m.status() == Severity::Critical {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let row = Row::new([
            Cell::from(m.name().to_string()),
            Cell::from(format!("{:.1}{}", m.value(), m.unit())),
            Cell::from(upper),
            Cell::from(lower),
            Cell::from(if m.is_inverted() { "inverted" } else { "normal" }),
            Cell::from(Span::styled(m.status_name(), status_style)),
        ]);
        if i == selected {
            row.style(Style::default().bg(Color::DarkGray))
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
            Constraint::Percentage(17),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Monitors [↑/↓]"),
    );

    f.render_widget(table, area);
}

/// Draw the selected monitor's values over time with threshold lines.
fn draw_value_chart(
    f: &mut Frame,
    app: &App,
    index: usize,
    monitor: &ThresholdMonitor,
    area: Rect,
) {
    let data: Vec<(f64, f64)> = app
        .history
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.value_of(index).map(|v| (i as f64, v)))
        .collect();

    let border_color = severity_color(monitor.status());
    let title = Span::styled(
        format!("{} ({})", monitor.name(), monitor.status_name()),
        Style::default().fg(border_color).add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(border_color));

    if data.is_empty() {
        f.render_widget(Paragraph::new("No readings yet").block(block), area);
        return;
    }

    let x_max = app.history.len().max(1) as f64;

    // Threshold lines: (value, color, label)
    let t = monitor.thresholds();
    let mut limits = vec![
        (t.upper_warning, Color::Yellow, "warn"),
        (t.upper_critical, Color::Red, "crit"),
    ];
    if t.lower_enabled() {
        limits.push((t.lower_warning, Color::Yellow, "low warn"));
        limits.push((t.lower_critical, Color::Red, "low crit"));
    }

    let y_min = data
        .iter()
        .map(|(_, y)| *y)
        .chain(limits.iter().map(|(v, _, _)| *v))
        .fold(f64::INFINITY, f64::min);
    let y_max = data
        .iter()
        .map(|(_, y)| *y)
        .chain(limits.iter().map(|(v, _, _)| *v))
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_max - y_min) * 0.05).max(1.0);
    let y_range = (y_min - pad, y_max + pad);

    let limit_lines: Vec<Vec<(f64, f64)>> = limits
        .iter()
        .map(|(v, _, _)| vec![(0.0, *v), (x_max, *v)])
        .collect();

    let mut datasets = vec![Dataset::default()
        .name(monitor.name())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data)];
    for ((_, color, label), line) in limits.iter().zip(&limit_lines) {
        datasets.push(
            Dataset::default()
                .name(*label)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(line),
        );
    }

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Samples")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .title(monitor.unit().trim().to_string())
                .style(Style::default().fg(Color::Gray))
                .labels(vec![
                    Span::raw(format!("{:.0}", y_range.0)),
                    Span::raw(format!("{:.0}", y_range.1)),
                ])
                .bounds([y_range.0, y_range.1]),
        );

    f.render_widget(chart, area);
}

/// Run in headless mode (no TUI, just printing to stdout).
///
/// # Arguments
///
/// * `app` - Application instance
/// * `running` - Atomic flag to signal shutdown
/// * `interval` - Time between samples
pub fn run_headless(
    mut app: App,
    running: Arc<AtomicBool>,
    interval: Duration,
) -> std::io::Result<()> {
    let csv_file = app.config.csv_file.clone();

    println!("alarm-rs - Threshold Alarms");
    println!("===========================");
    println!("Logging to: {}", csv_file);
    println!("Interval: {} seconds", interval.as_secs());
    println!("Press Ctrl+C to stop.\n");

    while running.load(Ordering::Relaxed) {
        let snapshot = app.sample()?;

        for record in &snapshot.records {
            if let Some(monitor) = app.monitors.get(record.index) {
                println!("[{}] {}", snapshot.datetime, monitor);
            }
        }

        app.push_history(snapshot);
        std::thread::sleep(interval);
    }

    println!("\nStopped. Data logged to {}", csv_file);
    Ok(())
}
