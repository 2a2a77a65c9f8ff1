//! AddChecklist operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::TaskId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Add a checklist to a task
#[operation(verb = "add", noun = "checklist", description = "Add a checklist to a task")]
#[derive(Debug, Serialize, Deserialize)]
pub struct AddChecklist {
    /// The task to add the checklist to
    pub task_id: TaskId,
    /// The checklist name
    pub name: String,
}

impl AddChecklist {
    pub fn new(task_id: impl Into<TaskId>, name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.task(&self.task_id).await?;

        let checklist = ctx
            .service()
            .add_checklist(ctx.project_id(), &self.task_id, &self.name)
            .await?;
        ctx.apply(BoardCommand::AddChecklist {
            task_id: self.task_id.clone(),
            checklist: checklist.clone(),
        })
        .await?;
        Ok(Outcome::Changed(serde_json::to_value(&checklist)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for AddChecklist {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string()]
    }
}
