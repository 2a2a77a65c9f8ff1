//! GetBoard operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Read the local snapshot without contacting the service
#[operation(verb = "get", noun = "board", description = "Get the local board snapshot")]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetBoard {}

impl GetBoard {
    pub fn new() -> Self {
        Self {}
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let board = ctx.snapshot().await;
        Ok(Outcome::Unchanged(serde_json::to_value(&board)?))
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }
}
