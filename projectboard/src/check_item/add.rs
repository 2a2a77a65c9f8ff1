//! AddCheckItem operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::{ChecklistId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Add an item to a checklist
#[operation(verb = "add", noun = "check-item", description = "Add an item to a checklist")]
#[derive(Debug, Serialize, Deserialize)]
pub struct AddCheckItem {
    pub task_id: TaskId,
    pub checklist_id: ChecklistId,
    /// The item text
    pub name: String,
}

impl AddCheckItem {
    pub fn new(
        task_id: impl Into<TaskId>,
        checklist_id: impl Into<ChecklistId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            checklist_id: checklist_id.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.checklist(&self.task_id, &self.checklist_id).await?;

        let item = ctx
            .service()
            .add_check_item(ctx.project_id(), &self.task_id, &self.checklist_id, &self.name)
            .await?;
        ctx.apply(BoardCommand::AddCheckItem {
            task_id: self.task_id.clone(),
            checklist_id: self.checklist_id.clone(),
            check_item: item.clone(),
        })
        .await?;
        Ok(Outcome::Changed(serde_json::to_value(&item)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for AddCheckItem {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string(), self.checklist_id.to_string()]
    }
}
