//! ClearColumn operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::ColumnId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Delete every task in a column, keeping the column
#[operation(verb = "clear", noun = "column", description = "Delete all tasks in a column")]
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearColumn {
    /// The column ID to clear
    pub id: ColumnId,
}

impl ClearColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let removed = ctx.column(&self.id).await?.task_ids;

        ctx.service()
            .clear_column(ctx.project_id(), &self.id)
            .await?;
        ctx.apply(BoardCommand::ClearColumn {
            column_id: self.id.clone(),
        })
        .await?;

        info!(column = %self.id, removed = removed.len(), "column cleared");
        Ok(Outcome::Changed(json!({
            "cleared": true,
            "id": self.id,
            "removed": removed,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for ClearColumn {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
