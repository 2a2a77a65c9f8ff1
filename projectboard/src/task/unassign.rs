//! UnassignTask operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::types::{MemberId, TaskId, TaskPatch};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Remove a member from a task's assignees
#[operation(verb = "unassign", noun = "task", description = "Remove a member from a task")]
#[derive(Debug, Serialize, Deserialize)]
pub struct UnassignTask {
    /// The task ID to unassign
    pub id: TaskId,
    /// The member to remove
    pub assignee: MemberId,
}

impl UnassignTask {
    pub fn new(id: impl Into<TaskId>, assignee: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            assignee: assignee.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let task = ctx.task(&self.id).await?;
        if !task.is_assigned(&self.assignee) {
            return Ok(Outcome::Unchanged(json!({
                "unassigned": false,
                "task_id": self.id,
                "all_assignees": task.assignees_ids,
            })));
        }

        let assignees = task
            .assignees_ids
            .into_iter()
            .filter(|id| id != &self.assignee)
            .collect();
        let confirmed = ctx
            .service()
            .update_task(
                ctx.project_id(),
                &self.id,
                &TaskPatch::new().with_assignees(assignees),
            )
            .await?;
        let task = apply_confirmed(ctx, &confirmed).await?;

        Ok(Outcome::Changed(json!({
            "unassigned": true,
            "task_id": self.id,
            "assignee": self.assignee,
            "all_assignees": task.assignees_ids,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for UnassignTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string(), self.assignee.to_string()]
    }
}
