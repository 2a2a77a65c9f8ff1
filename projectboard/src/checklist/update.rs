//! UpdateChecklist operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::{ChecklistId, ChecklistPatch, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a checklist
#[operation(verb = "update", noun = "checklist", description = "Rename a checklist")]
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateChecklist {
    /// The task holding the checklist
    pub task_id: TaskId,
    /// The checklist ID
    pub id: ChecklistId,
    /// The new name
    pub name: String,
}

impl UpdateChecklist {
    pub fn new(
        task_id: impl Into<TaskId>,
        id: impl Into<ChecklistId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            id: id.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.checklist(&self.task_id, &self.id).await?;

        let confirmed = ctx
            .service()
            .update_checklist(
                ctx.project_id(),
                &self.task_id,
                &self.id,
                &ChecklistPatch::name(&self.name),
            )
            .await?;
        ctx.apply(BoardCommand::UpdateChecklist {
            task_id: self.task_id.clone(),
            checklist_id: self.id.clone(),
            patch: ChecklistPatch::name(confirmed.name),
        })
        .await?;

        let checklist = ctx.checklist(&self.task_id, &self.id).await?;
        Ok(Outcome::Changed(serde_json::to_value(&checklist)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for UpdateChecklist {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string(), self.id.to_string()]
    }
}
