//! AddTask operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::ColumnId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Add a task to the end of a column
#[operation(verb = "add", noun = "task", description = "Create a new task in a column")]
#[derive(Debug, Serialize, Deserialize)]
pub struct AddTask {
    /// The column to add the task to
    pub column: ColumnId,
    /// The task name
    pub name: String,
}

impl AddTask {
    pub fn new(column: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.column(&self.column).await?;

        let created = ctx
            .service()
            .create_task(ctx.project_id(), &self.column, &self.name)
            .await?;

        ctx.apply(BoardCommand::CreateTask {
            column_id: self.column.clone(),
            task_id: created.id.clone(),
            name: created.name.clone(),
            author_id: created.author_id.clone(),
        })
        .await?;
        let task = apply_confirmed(ctx, &created).await?;
        info!(task = %task.id, column = %self.column, "task added");
        Ok(Outcome::Changed(serde_json::to_value(&task)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for AddTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.column.to_string()]
    }
}
