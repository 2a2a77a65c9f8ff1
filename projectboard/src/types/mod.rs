//! Core types for the board engine

mod board;
mod ids;
mod patch;
mod task;

// Re-export all types
pub use board::{Board, Column, Member};
pub use ids::{
    AttachmentId, CheckItemId, ChecklistId, ColumnId, CommentId, MemberId, ProjectId, TaskId,
};
pub use patch::{CheckItemPatch, ChecklistPatch, ColumnPatch, TaskPatch};
pub use task::{Attachment, CheckItem, CheckItemState, Checklist, Comment, Task};
