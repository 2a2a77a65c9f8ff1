//! Column reducers

use crate::error::{BoardError, Result};
use crate::types::{Board, Column, ColumnId, ColumnPatch};

pub(super) fn create(board: &mut Board, column_id: ColumnId, name: String) -> Result<()> {
    if board.columns.contains_key(&column_id) {
        return Err(BoardError::duplicate_id("column", column_id.to_string()));
    }
    board.column_order.push(column_id.clone());
    board.columns.insert(column_id.clone(), Column::new(column_id, name));
    Ok(())
}

pub(super) fn update(board: &mut Board, column_id: &ColumnId, patch: &ColumnPatch) -> Result<()> {
    let column = board.require_column_mut(column_id)?;
    patch.apply(column);
    Ok(())
}

pub(super) fn clear(board: &mut Board, column_id: &ColumnId) -> Result<()> {
    let column = board.require_column_mut(column_id)?;
    let removed = std::mem::take(&mut column.task_ids);
    for task_id in &removed {
        board.tasks.remove(task_id);
    }
    Ok(())
}

/// Non-empty columns are rejected; clear them first.
pub(super) fn delete(board: &mut Board, column_id: &ColumnId) -> Result<()> {
    let column = board.require_column(column_id)?;
    if !column.is_empty() {
        return Err(BoardError::ColumnNotEmpty {
            id: column_id.to_string(),
            count: column.len(),
        });
    }
    board.columns.remove(column_id);
    board.column_order.retain(|id| id != column_id);
    Ok(())
}
