//! Board operation processor
//!
//! Executes sync operations and keeps the context's activity log. Every
//! mutation becomes one entry, and so does every failure, whether it came
//! from the service or from a local precondition such as an unknown task.
//! Reads and no-ops are not recorded.

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use projectboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{info, warn};

/// What a sync operation did to the board
pub(crate) enum Outcome {
    /// The board changed (or the service was asked to change it)
    Changed(Value),
    /// Reads and no-ops
    Unchanged(Value),
}

/// Turn an operation's result into an `ExecutionResult` with a timed log entry
pub(crate) fn finish<T>(
    operation: &T,
    started: Instant,
    result: Result<Outcome>,
) -> ExecutionResult<Value, BoardError>
where
    T: Operation + Serialize,
{
    let duration_ms = started.elapsed().as_millis() as u64;
    let input = serde_json::to_value(operation).unwrap_or(Value::Null);

    match result {
        Ok(Outcome::Changed(value)) => ExecutionResult::Logged {
            log_entry: LogEntry::new(operation.op_string(), input, value.clone(), None, duration_ms),
            value,
        },
        Ok(Outcome::Unchanged(value)) => ExecutionResult::Unlogged { value },
        Err(error) => {
            warn!(op = %operation.op_string(), %error, "board operation failed");
            let output = json!({ "error": error.to_string() });
            ExecutionResult::Failed {
                log_entry: Some(LogEntry::new(
                    operation.op_string(),
                    input,
                    output,
                    None,
                    duration_ms,
                )),
                error,
            }
        }
    }
}

/// Processor that records activity on the [`SyncContext`]
#[derive(Debug, Default, Clone, Copy)]
pub struct BoardOperationProcessor;

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OperationProcessor<SyncContext, BoardError> for BoardOperationProcessor {
    async fn process<T>(&self, operation: &T, ctx: &SyncContext) -> Result<Value>
    where
        T: Execute<SyncContext, BoardError> + Send + Sync,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = ctx.actor() {
                entry = entry.with_actor(actor);
            }
            self.write_log(ctx, &entry, &operation.affected_resources())
                .await?;
        }

        result
    }

    async fn write_log(
        &self,
        ctx: &SyncContext,
        log_entry: &LogEntry,
        affected_resources: &[String],
    ) -> Result<()> {
        let entry = log_entry.clone().with_affected(affected_resources.to_vec());
        info!(
            op = %entry.op,
            entry_id = %entry.id,
            duration_ms = entry.duration_ms,
            failed = entry.is_error(),
            affected = ?entry.affected,
            "board activity"
        );
        ctx.append_activity(entry).await;
        Ok(())
    }
}
