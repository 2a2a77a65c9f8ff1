//! SubscribeTask operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::types::{TaskId, TaskPatch};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Subscribe to or unsubscribe from a task's notifications
#[operation(
    verb = "subscribe",
    noun = "task",
    description = "Subscribe to or unsubscribe from a task"
)]
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscribeTask {
    /// The task ID
    pub id: TaskId,
    /// true to subscribe, false to unsubscribe
    pub subscribed: bool,
}

impl SubscribeTask {
    pub fn subscribe(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            subscribed: true,
        }
    }

    pub fn unsubscribe(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            subscribed: false,
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let task = ctx.task(&self.id).await?;
        let response = |is_subscribed: bool| json!({ "task_id": self.id, "is_subscribed": is_subscribed });
        if task.is_subscribed == self.subscribed {
            return Ok(Outcome::Unchanged(response(task.is_subscribed)));
        }

        let confirmed = ctx
            .service()
            .update_task(
                ctx.project_id(),
                &self.id,
                &TaskPatch::new().with_subscribed(self.subscribed),
            )
            .await?;
        let task = apply_confirmed(ctx, &confirmed).await?;
        Ok(Outcome::Changed(response(task.is_subscribed)))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for SubscribeTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_subscribe_then_unsubscribe() {
        let (service, ctx) = testing::setup().await;

        let value = SubscribeTask::subscribe("t2")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(value["is_subscribed"], true);
        assert!(ctx.task(&"t2".into()).await.unwrap().is_subscribed);

        SubscribeTask::unsubscribe("t2")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert!(!ctx.task(&"t2".into()).await.unwrap().is_subscribed);
        assert_eq!(service.calls("update_task"), 2);
    }

    #[tokio::test]
    async fn test_unsubscribe_when_not_subscribed() {
        let (service, ctx) = testing::setup().await;

        let result = SubscribeTask::unsubscribe("t2").execute(&ctx).await;
        assert!(!result.should_log());
        assert_eq!(service.total_calls(), 0);
    }
}
