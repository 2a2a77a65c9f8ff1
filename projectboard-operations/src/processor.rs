//! Operation processor trait

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations and decides what happens to their log entries.
///
/// Each domain supplies its own processor: one may keep an in-memory activity
/// feed, another may drop logs entirely.
#[async_trait]
pub trait OperationProcessor<C, E>
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation` and record its log entry (if any)
    async fn process<T>(&self, operation: &T, ctx: &C) -> Result<Value, E>
    where
        T: Execute<C, E> + Send + Sync;

    /// Persist a single log entry
    async fn write_log(
        &self,
        ctx: &C,
        log_entry: &LogEntry,
        affected_resources: &[String],
    ) -> Result<(), E>;
}
