//! AddColumn operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Add a column at the end of the board
#[operation(verb = "add", noun = "column", description = "Create a new column")]
#[derive(Debug, Serialize, Deserialize)]
pub struct AddColumn {
    /// The column name
    pub name: String,
}

impl AddColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let column = ctx
            .service()
            .create_column(ctx.project_id(), &self.name)
            .await?;

        let column = ctx
            .apply_then(
                BoardCommand::CreateColumn {
                    column_id: column.id.clone(),
                    name: column.name.clone(),
                },
                |board| board.require_column(&column.id).cloned(),
            )
            .await?;
        info!(column = %column.id, name = %column.name, "column added");
        Ok(Outcome::Changed(serde_json::to_value(&column)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for AddColumn {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }
}
