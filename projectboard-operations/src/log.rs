//! Log entry types for operation tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A log entry recording one executed board operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this log entry (ULID format)
    pub id: String,

    /// When the operation completed
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "add column", "move task")
    pub op: String,

    /// The normalized input parameters (as JSON)
    pub input: Value,

    /// The result value or error (as JSON)
    pub output: Value,

    /// Who performed the operation (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// Resource ids the operation touched (task, column, checklist ids)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected: Vec<String>,

    /// How long the operation took, including the remote round-trip (milliseconds)
    pub duration_ms: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor,
            affected: Vec::new(),
            duration_ms,
        }
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Record the affected resource ids
    pub fn with_affected(mut self, affected: Vec<String>) -> Self {
        self.affected = affected;
        self
    }

    /// True when the output records an error
    pub fn is_error(&self) -> bool {
        self.output.get("error").is_some()
    }
}
