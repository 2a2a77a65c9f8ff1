//! DeleteTask operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::TaskId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a task
#[operation(verb = "delete", noun = "task", description = "Delete a task")]
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let task = ctx.task(&self.id).await?;

        ctx.service()
            .delete_task(ctx.project_id(), &self.id)
            .await?;
        ctx.apply(BoardCommand::DeleteTask {
            task_id: self.id.clone(),
        })
        .await?;

        Ok(Outcome::Changed(json!({
            "deleted": true,
            "id": self.id,
            "column_id": task.column_id,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for DeleteTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
