//! UpdateCheckItem operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::types::{CheckItemId, CheckItemPatch, CheckItemState, ChecklistId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a check item or set its state
#[operation(
    verb = "update",
    noun = "check-item",
    description = "Rename a check item or change its state"
)]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCheckItem {
    pub task_id: TaskId,
    pub checklist_id: ChecklistId,
    pub id: CheckItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CheckItemState>,
}

impl UpdateCheckItem {
    pub fn new(
        task_id: impl Into<TaskId>,
        checklist_id: impl Into<ChecklistId>,
        id: impl Into<CheckItemId>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            checklist_id: checklist_id.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_state(mut self, state: CheckItemState) -> Self {
        self.state = Some(state);
        self
    }

    fn patch(&self) -> CheckItemPatch {
        CheckItemPatch {
            name: self.name.clone(),
            state: self.state,
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let current = ctx
            .check_item(&self.task_id, &self.checklist_id, &self.id)
            .await?;

        let patch = self.patch();
        if patch.name.is_none() && patch.state.is_none() {
            return Ok(Outcome::Unchanged(serde_json::to_value(&current)?));
        }

        let confirmed = ctx
            .service()
            .update_check_item(
                ctx.project_id(),
                &self.task_id,
                &self.checklist_id,
                &self.id,
                &patch,
            )
            .await?;
        let item = apply_confirmed(ctx, &self.task_id, &self.checklist_id, &confirmed).await?;
        Ok(Outcome::Changed(serde_json::to_value(&item)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for UpdateCheckItem {
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
    async fn test_rename_keeps_state() {
        let (_service, ctx) = testing::setup().await;

        UpdateCheckItem::new("t1", "l1", "i2")
            .with_name("peer review")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let item = ctx
            .check_item(&"t1".into(), &"l1".into(), &"i2".into())
            .await
            .unwrap();
        assert_eq!(item.name, "peer review");
        assert_eq!(item.state, CheckItemState::Incomplete);
    }

    #[tokio::test]
    async fn test_set_state() {
        let (service, ctx) = testing::setup().await;

        let result = UpdateCheckItem::new("t1", "l1", "i1")
            .with_state(CheckItemState::Complete)
            .execute(&ctx)
            .await;
        assert!(result.should_log());

        let item = ctx
            .check_item(&"t1".into(), &"l1".into(), &"i1".into())
            .await
            .unwrap();
        assert!(item.is_complete());
        assert_eq!(service.calls("update_check_item"), 1);
    }

    #[tokio::test]
    async fn test_empty_update_makes_no_call() {
        let (service, ctx) = testing::setup().await;

        let result = UpdateCheckItem::new("t1", "l1", "i1").execute(&ctx).await;
        assert!(!result.should_log());
        assert_eq!(service.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_item() {
        let (service, ctx) = testing::setup().await;

        let err = UpdateCheckItem::new("t1", "l1", "i9")
            .with_name("x")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BoardError::CheckItemNotFound { .. }));
        assert_eq!(service.total_calls(), 0);
    }
}
