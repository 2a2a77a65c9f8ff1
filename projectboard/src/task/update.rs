//! UpdateTask operation

use super::apply_confirmed;
use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::types::{TaskId, TaskPatch};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Update task fields; unset fields are left alone
#[operation(verb = "update", noun = "task", description = "Update a task's name, description or labels")]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    /// New task name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// Replace all labels
    pub labels: Option<Vec<String>>,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    fn patch(&self) -> TaskPatch {
        TaskPatch {
            name: self.name.clone(),
            description: self.description.clone(),
            labels: self.labels.clone(),
            ..TaskPatch::default()
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let task = ctx.task(&self.id).await?;
        let patch = self.patch();
        if patch.is_empty() {
            return Ok(Outcome::Unchanged(serde_json::to_value(&task)?));
        }

        let confirmed = ctx
            .service()
            .update_task(ctx.project_id(), &self.id, &patch)
            .await?;
        let task = apply_confirmed(ctx, &confirmed).await?;
        Ok(Outcome::Changed(serde_json::to_value(&task)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for UpdateTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
