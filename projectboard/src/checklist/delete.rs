//! DeleteChecklist operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::{ChecklistId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a checklist and its items
#[operation(verb = "delete", noun = "checklist", description = "Delete a checklist from a task")]
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteChecklist {
    /// The task holding the checklist
    pub task_id: TaskId,
    /// The checklist ID
    pub id: ChecklistId,
}

impl DeleteChecklist {
    pub fn new(task_id: impl Into<TaskId>, id: impl Into<ChecklistId>) -> Self {
        Self {
            task_id: task_id.into(),
            id: id.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.checklist(&self.task_id, &self.id).await?;

        ctx.service()
            .delete_checklist(ctx.project_id(), &self.task_id, &self.id)
            .await?;
        ctx.apply(BoardCommand::DeleteChecklist {
            task_id: self.task_id.clone(),
            checklist_id: self.id.clone(),
        })
        .await?;

        Ok(Outcome::Changed(json!({
            "deleted": true,
            "task_id": self.task_id,
            "id": self.id,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for DeleteChecklist {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.task_id.to_string(), self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_delete_checklist() {
        let (service, ctx) = testing::setup().await;

        DeleteChecklist::new("t1", "l1")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert!(ctx.task(&"t1".into()).await.unwrap().checklists.is_empty());
        assert_eq!(service.calls("delete_checklist"), 1);
    }
}
