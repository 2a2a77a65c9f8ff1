//! ToggleCheckItem operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::types::{CheckItemId, CheckItemPatch, ChecklistId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Flip a check item between complete and incomplete
#[operation(
    verb = "toggle",
    noun = "check-item",
    description = "Flip a check item between complete and incomplete"
)]
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleCheckItem {
    pub task_id: TaskId,
    pub checklist_id: ChecklistId,
    pub id: CheckItemId,
}

impl ToggleCheckItem {
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
        let current = ctx
            .check_item(&self.task_id, &self.checklist_id, &self.id)
            .await?;

        // The service takes an absolute state, not a toggle
        let confirmed = ctx
            .service()
            .update_check_item(
                ctx.project_id(),
                &self.task_id,
                &self.checklist_id,
                &self.id,
                &CheckItemPatch::state(current.state.toggled()),
            )
            .await?;
        let item = apply_confirmed(ctx, &self.task_id, &self.checklist_id, &confirmed).await?;
        Ok(Outcome::Changed(serde_json::to_value(&item)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for ToggleCheckItem {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string(), self.id.to_string()]
    }
}
