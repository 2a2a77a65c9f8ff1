//! DeleteCheckItem operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::{CheckItemId, ChecklistId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Remove an item from a checklist
#[operation(verb = "delete", noun = "check-item", description = "Remove an item from a checklist")]
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCheckItem {
    pub task_id: TaskId,
    pub checklist_id: ChecklistId,
    pub id: CheckItemId,
}

impl DeleteCheckItem {
    pub fn new(
        task_id: impl Into<TaskId>,
        checklist_id: impl Into<ChecklistId>,
        id: impl Into<CheckItemId>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            checklist_id: checklist_id.into(),
            id: id.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.check_item(&self.task_id, &self.checklist_id, &self.id)
            .await?;

        ctx.service()
            .delete_check_item(ctx.project_id(), &self.task_id, &self.checklist_id, &self.id)
            .await?;
        ctx.apply(BoardCommand::DeleteCheckItem {
            task_id: self.task_id.clone(),
            checklist_id: self.checklist_id.clone(),
            check_item_id: self.id.clone(),
        })
        .await?;

        Ok(Outcome::Changed(json!({ "deleted": true, "id": self.id })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for DeleteCheckItem {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string(), self.id.to_string()]
    }
}
