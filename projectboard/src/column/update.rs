//! UpdateColumn operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::{ColumnId, ColumnPatch};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a column
#[operation(verb = "update", noun = "column", description = "Rename a column")]
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// The new column name
    pub name: String,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        ctx.column(&self.id).await?;

        let confirmed = ctx
            .service()
            .update_column(ctx.project_id(), &self.id, &ColumnPatch::name(&self.name))
            .await?;

        let column = ctx
            .apply_then(
                BoardCommand::UpdateColumn {
                    column_id: self.id.clone(),
                    patch: ColumnPatch::name(confirmed.name),
                },
                |board| board.require_column(&self.id).cloned(),
            )
            .await?;
        Ok(Outcome::Changed(serde_json::to_value(&column)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for UpdateColumn {
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
    async fn test_rename_column() {
        let (_service, ctx) = testing::setup().await;

        let value = UpdateColumn::new("doing", "In Progress")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(value["name"], "In Progress");
        assert_eq!(
            ctx.snapshot().await.column(&"doing".into()).unwrap().name,
            "In Progress"
        );
    }

    #[tokio::test]
    async fn test_missing_column_makes_no_call() {
        let (service, ctx) = testing::setup().await;

        let err = UpdateColumn::new("nope", "x")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound { .. }));
        assert!(!err.is_user_facing());
        assert_eq!(service.total_calls(), 0);
    }
}
