//! Execution result types for operations

use crate::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: mutations that reached the board and belong in the activity log
/// - Unlogged: reads and no-ops (e.g. a drag dropped where it started)
/// - Failed: errors, optionally logged
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }

    /// True for the `Failed` variant
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The log entry, if one was produced
    pub fn log_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Logged { log_entry, .. } => Some(log_entry),
            Self::Failed { log_entry, .. } => log_entry.as_ref(),
            Self::Unlogged { .. } => None,
        }
    }
}
