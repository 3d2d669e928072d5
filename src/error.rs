//! Error types for alarm-rs.

/// Errors reported by monitor operations and configuration parsing.
///
/// None of these are fatal: the monitor that produced them is left
/// exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlarmError {
    /// A forced status code outside `0..=3`.
    #[error("invalid severity code {0} (expected 0..=3)")]
    InvalidSeverity(u8),

    #[error("monitor name must not be empty")]
    EmptyName,

    #[error("monitor unit must not be empty")]
    EmptyUnit,

    /// A `--monitor` argument that does not follow
    /// `name:upper_warning:upper_critical[:lower_warning:lower_critical][:inverted]`.
    #[error("invalid monitor spec: {0}")]
    InvalidMonitorSpec(String),
}
