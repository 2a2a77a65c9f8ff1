//! The closed set of board store commands

use crate::types::{
    Board, CheckItem, CheckItemId, CheckItemPatch, Checklist, ChecklistId, ChecklistPatch,
    ColumnId, ColumnPatch, Comment, MemberId, TaskId, TaskPatch,
};

/// A single atomic transformation of a board snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    /// Replace the whole snapshot with a fetched board
    Load { board: Board },
    CreateColumn {
        column_id: ColumnId,
        name: String,
    },
    UpdateColumn {
        column_id: ColumnId,
        patch: ColumnPatch,
    },
    /// Delete every task of the column and empty its order list
    ClearColumn { column_id: ColumnId },
    /// Remove an empty column
    DeleteColumn { column_id: ColumnId },
    /// Append a new task to the end of a column
    CreateTask {
        column_id: ColumnId,
        task_id: TaskId,
        name: String,
        author_id: Option<MemberId>,
    },
    UpdateTask { task_id: TaskId, patch: TaskPatch },
    /// Relocate a task; `position` is in post-removal coordinates and
    /// `column_id: None` keeps the task in its current column
    MoveTask {
        task_id: TaskId,
        position: usize,
        column_id: Option<ColumnId>,
    },
    DeleteTask { task_id: TaskId },
    AddChecklist {
        task_id: TaskId,
        checklist: Checklist,
    },
    UpdateChecklist {
        task_id: TaskId,
        checklist_id: ChecklistId,
        patch: ChecklistPatch,
    },
    DeleteChecklist {
        task_id: TaskId,
        checklist_id: ChecklistId,
    },
    AddCheckItem {
        task_id: TaskId,
        checklist_id: ChecklistId,
        check_item: CheckItem,
    },
    UpdateCheckItem {
        task_id: TaskId,
        checklist_id: ChecklistId,
        check_item_id: CheckItemId,
        patch: CheckItemPatch,
    },
    DeleteCheckItem {
        task_id: TaskId,
        checklist_id: ChecklistId,
        check_item_id: CheckItemId,
    },
    AddComment { task_id: TaskId, comment: Comment },
}

impl BoardCommand {
    /// Short name used in tracing output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::CreateColumn { .. } => "create_column",
            Self::UpdateColumn { .. } => "update_column",
            Self::ClearColumn { .. } => "clear_column",
            Self::DeleteColumn { .. } => "delete_column",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::MoveTask { .. } => "move_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::AddChecklist { .. } => "add_checklist",
            Self::UpdateChecklist { .. } => "update_checklist",
            Self::DeleteChecklist { .. } => "delete_checklist",
            Self::AddCheckItem { .. } => "add_check_item",
            Self::UpdateCheckItem { .. } => "update_check_item",
            Self::DeleteCheckItem { .. } => "delete_check_item",
            Self::AddComment { .. } => "add_comment",
        }
    }

    /// Create a column with a locally generated id
    pub fn create_column(name: impl Into<String>) -> Self {
        Self::CreateColumn {
            column_id: ColumnId::new(),
            name: name.into(),
        }
    }

    /// Create a task with a locally generated id
    pub fn create_task(column_id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self::CreateTask {
            column_id: column_id.into(),
            task_id: TaskId::new(),
            name: name.into(),
            author_id: None,
        }
    }

    /// Move a task within its column or to another column
    pub fn move_task(
        task_id: impl Into<TaskId>,
        position: usize,
        column_id: Option<ColumnId>,
    ) -> Self {
        Self::MoveTask {
            task_id: task_id.into(),
            position,
            column_id,
        }
    }
}
