//! DeleteColumn operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use crate::types::ColumnId;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete an empty column
#[operation(verb = "delete", noun = "column", description = "Delete an empty column")]
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let column = ctx.column(&self.id).await?;
        if !column.is_empty() {
            return Err(BoardError::ColumnNotEmpty {
                id: self.id.to_string(),
                count: column.len(),
            });
        }

        ctx.service()
            .delete_column(ctx.project_id(), &self.id)
            .await?;
        ctx.apply(BoardCommand::DeleteColumn {
            column_id: self.id.clone(),
        })
        .await?;

        Ok(Outcome::Changed(json!({
            "deleted": true,
            "id": self.id,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for DeleteColumn {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
