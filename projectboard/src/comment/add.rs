//! AddComment operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::TaskId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Post a comment on a task
#[operation(verb = "add", noun = "comment", description = "Post a comment on a task")]
#[derive(Debug, Serialize, Deserialize)]
pub struct AddComment {
    /// The task to comment on
    pub task_id: TaskId,
    /// The comment text
    pub message: String,
}

impl AddComment {
    pub fn new(task_id: impl Into<TaskId>, message: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            message: message.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.task(&self.task_id).await?;

        let comment = ctx
            .service()
            .add_comment(ctx.project_id(), &self.task_id, &self.message)
            .await?;
        ctx.apply(BoardCommand::AddComment {
            task_id: self.task_id.clone(),
            comment: comment.clone(),
        })
        .await?;
        Ok(Outcome::Changed(serde_json::to_value(&comment)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for AddComment {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string()]
    }
}
