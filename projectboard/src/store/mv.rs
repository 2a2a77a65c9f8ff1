//! Move-task algorithm
//!
//! `position` is the destination index in post-removal coordinates, the same
//! convention drag-and-drop libraries use: the task is first taken out of its
//! source list, then inserted at `min(position, len)` of the target list.

use crate::error::{BoardError, Result};
use crate::types::{Board, ColumnId, TaskId};
use serde::Serialize;
use tracing::debug;

/// A resolved move: where the task is and where it will land
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePlan {
    pub task_id: TaskId,
    pub from_column: ColumnId,
    pub from_index: usize,
    pub to_column: ColumnId,
    pub to_index: usize,
}

impl MovePlan {
    /// True when applying the plan would not change the board
    pub fn is_noop(&self) -> bool {
        self.from_column == self.to_column && self.from_index == self.to_index
    }

    /// True when the task changes column
    pub fn crosses_columns(&self) -> bool {
        self.from_column != self.to_column
    }
}

/// Resolve a move against a snapshot without changing it
pub fn plan_move(
    board: &Board,
    task_id: &TaskId,
    position: usize,
    column_id: Option<&ColumnId>,
) -> Result<MovePlan> {
    let task = board.require_task(task_id)?;
    let from_column = task.column_id.clone();
    let source = board.require_column(&from_column)?;
    let from_index = source.position_of(task_id).ok_or_else(|| {
        BoardError::inconsistent(format!(
            "task {} is not listed in its column {}",
            task_id, from_column
        ))
    })?;

    let to_column = column_id.cloned().unwrap_or_else(|| from_column.clone());
    let target = board.require_column(&to_column)?;
    let len_after_removal = if to_column == from_column {
        target.len() - 1
    } else {
        target.len()
    };
    let to_index = position.min(len_after_removal);

    let plan = MovePlan {
        task_id: task_id.clone(),
        from_column,
        from_index,
        to_column,
        to_index,
    };
    debug!(?plan, requested = position, "planned task move");
    Ok(plan)
}

/// Whether moving `task_id` to `position` (in `column_id`, or its own column)
/// would leave the board unchanged
pub fn is_noop_move(
    board: &Board,
    task_id: &TaskId,
    position: usize,
    column_id: Option<&ColumnId>,
) -> Result<bool> {
    Ok(plan_move(board, task_id, position, column_id)?.is_noop())
}

/// Apply a plan produced by [`plan_move`] against the same snapshot
pub(super) fn apply(board: &mut Board, plan: &MovePlan) {
    if plan.is_noop() {
        return;
    }
    if let Some(source) = board.columns.get_mut(&plan.from_column) {
        source.task_ids.remove(plan.from_index);
    }
    if let Some(target) = board.columns.get_mut(&plan.to_column) {
        let index = plan.to_index.min(target.task_ids.len());
        target.task_ids.insert(index, plan.task_id.clone());
    }
    if let Some(task) = board.tasks.get_mut(&plan.task_id) {
        task.column_id = plan.to_column.clone();
    }
}
