//! Comment reducer. Comments are append-only.

use crate::error::{BoardError, Result};
use crate::types::{Board, Comment, TaskId};

pub(super) fn add(board: &mut Board, task_id: &TaskId, comment: Comment) -> Result<()> {
    let task = board.require_task_mut(task_id)?;
    if task.find_comment(&comment.id).is_some() {
        return Err(BoardError::duplicate_id("comment", comment.id.to_string()));
    }
    task.comments.push(comment);
    Ok(())
}
