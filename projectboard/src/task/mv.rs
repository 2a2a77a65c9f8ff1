//! MoveTask operation

use crate::context::SyncContext;
use crate::error::{BoardError, Result};
use crate::processor::{finish, Outcome};
use crate::store::{plan_move, BoardCommand};
use crate::types::{ColumnId, TaskId};
use projectboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Move a task within its column or to another column.
///
/// `position` is the destination index after the task has been taken out of
/// its source list. The service is told about the move but does not report an
/// order back, so the locally computed order is kept once the call succeeds.
#[operation(
    verb = "move",
    noun = "task",
    description = "Move a task to a different column or position"
)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Destination index; clamped to the end of the target column
    pub position: usize,
    /// Target column; omit to move within the current column
    pub column: Option<ColumnId>,
}

impl MoveTask {
    /// Move within the task's current column
    pub fn new(id: impl Into<TaskId>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
            column: None,
        }
    }

    /// Target another column
    pub fn to_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    async fn run(&self, ctx: &SyncContext) -> Result<Outcome> {
        let plan = ctx
            .read(|board| plan_move(board, &self.id, self.position, self.column.as_ref()))
            .await?;
        if plan.is_noop() {
            debug!(task = %self.id, "move is a no-op");
            return Ok(Outcome::Unchanged(json!({
                "moved": false,
                "task_id": self.id,
                "column_id": plan.from_column,
                "index": plan.from_index,
            })));
        }

        ctx.service()
            .move_task(
                ctx.project_id(),
                &self.id,
                self.position,
                self.column.as_ref(),
            )
            .await?;

        let (column_id, index) = ctx
            .apply_then(
                BoardCommand::move_task(self.id.clone(), self.position, self.column.clone()),
                |board| {
                    let column = board.column_of(&self.id)?;
                    Ok((
                        column.id.clone(),
                        column.position_of(&self.id).unwrap_or_default(),
                    ))
                },
            )
            .await?;
        info!(
            task = %self.id,
            from = %plan.from_column,
            to = %column_id,
            index,
            "task moved"
        );

        let reconciled = ctx.config().reconcile_after_move && self.reconcile(ctx).await;

        Ok(Outcome::Changed(json!({
            "moved": true,
            "task_id": self.id,
            "from": { "column_id": plan.from_column, "index": plan.from_index },
            "to": { "column_id": column_id, "index": index },
            "reconciled": reconciled,
        })))
    }

    /// Replace the snapshot with the service's board. A failure keeps the
    /// optimistic order.
    async fn reconcile(&self, ctx: &SyncContext) -> bool {
        let fetched = match ctx.service().fetch_board(ctx.project_id()).await {
            Ok(board) => board,
            Err(error) => {
                warn!(task = %self.id, %error, "reconcile after move failed; keeping local order");
                return false;
            }
        };
        match ctx.apply(BoardCommand::Load { board: fetched }).await {
            Ok(()) => true,
            Err(error) => {
                warn!(task = %self.id, %error, "fetched board rejected; keeping local order");
                false
            }
        }
    }
}

#[async_trait]
impl Execute<SyncContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
        finish(self, Instant::now(), self.run(ctx).await)
    }

    fn affected_resources(&self) -> Vec<String> {
        let mut affected = vec![self.id.to_string()];
        if let Some(column) = &self.column {
            affected.push(column.to_string());
        }
        affected
    }
}
