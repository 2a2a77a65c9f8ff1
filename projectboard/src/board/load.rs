//! LoadBoard operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::BoardCommand;
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Fetch the project's board and replace the local snapshot with it
#[operation(
    verb = "load",
    noun = "board",
    description = "Fetch the full board from the project service"
)]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoadBoard {}

impl LoadBoard {
    pub fn new() -> Self {
        Self {}
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let board = ctx.service().fetch_board(ctx.project_id()).await?;
        let columns = board.column_ids().len();
        let tasks = board.task_count();

        ctx.apply(BoardCommand::Load { board }).await?;
        info!(project = %ctx.project_id(), columns, tasks, "board loaded");

        Ok(Outcome::Changed(json!({
            "project_id": ctx.project_id(),
            "columns": columns,
            "tasks": tasks,
            "revision": ctx.revision().await,
        })))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for LoadBoard {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        finish(self, started, self.run(ctx).await)
    }
}
