//! In-process project service
//!
//! Keeps one board per project and runs every mutation through the same
//! reducer as the client store. Calls are counted per method and the next
//! call can be made to fail, which is what the sync layer tests lean on.

use super::ProjectService;
use crate::error::{BoardError, Result};
use crate::store::{reduce, BoardCommand};
use crate::types::{
    Board, CheckItem, CheckItemId, CheckItemPatch, Checklist, ChecklistId, ChecklistPatch, Column,
    ColumnId, ColumnPatch, Comment, CommentId, MemberId, ProjectId, Task, TaskId, TaskPatch,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// How an injected failure surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureMode {
    /// Connection-level failure
    Transport,
    /// Rejection with the given message
    Validation(String),
    /// The addressed resource no longer exists on the server
    NotFound,
}

#[derive(Default)]
struct State {
    boards: HashMap<ProjectId, Board>,
    calls: HashMap<&'static str, usize>,
    /// Pending failure, optionally restricted to one method
    fail_next: Option<(Option<String>, FailureMode)>,
}

/// [`ProjectService`] that lives in memory
pub struct InMemoryProjectService {
    state: Mutex<State>,
    author: MemberId,
    /// Fields the service fills in on every created task
    task_defaults: TaskPatch,
}

impl Default for InMemoryProjectService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(board: &mut Board, command: BoardCommand) -> Result<()> {
    *board = reduce(board, command)?;
    Ok(())
}

fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BoardError::validation(format!("{kind} name is required")));
    }
    Ok(())
}

impl InMemoryProjectService {
    /// Service with no boards, acting as member `local-user`
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            author: MemberId::from("local-user"),
            task_defaults: TaskPatch::default(),
        }
    }

    /// Seed a project board
    pub fn with_board(self, project_id: impl Into<ProjectId>, board: Board) -> Self {
        self.insert_board(project_id, board);
        self
    }

    /// Member recorded as author of created tasks and comments
    pub fn with_author(mut self, author: impl Into<MemberId>) -> Self {
        self.author = author.into();
        self
    }

    /// Server-side defaults applied to each created task, such as
    /// subscribing the author
    pub fn with_task_defaults(mut self, defaults: TaskPatch) -> Self {
        self.task_defaults = defaults;
        self
    }

    /// Replace a project's board, as another collaborator's edits would
    pub fn insert_board(&self, project_id: impl Into<ProjectId>, board: Board) {
        self.state().boards.insert(project_id.into(), board);
    }

    /// The server-side board of a project
    pub fn board(&self, project_id: &ProjectId) -> Option<Board> {
        self.state().boards.get(project_id).cloned()
    }

    /// Make the next call fail, whichever method it is
    pub fn fail_next(&self, mode: FailureMode) {
        self.state().fail_next = Some((None, mode));
    }

    /// Make the next call to `method` fail; other calls go through
    pub fn fail_next_call_to(&self, method: &str, mode: FailureMode) {
        self.state().fail_next = Some((Some(method.to_string()), mode));
    }

    /// Number of calls made to `method` (e.g. `"move_task"`)
    pub fn calls(&self, method: &str) -> usize {
        self.state().calls.get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state().calls.values().sum()
    }

    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("InMemoryProjectService mutex poisoned")
    }

    /// Count the call, honor an injected failure, then run `f` on a copy of
    /// the project's board. The copy replaces the board only if `f` succeeds.
    fn call<T>(
        &self,
        method: &'static str,
        project_id: &ProjectId,
        f: impl FnOnce(&mut Board) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.state();
        *state.calls.entry(method).or_default() += 1;

        let armed = matches!(
            &state.fail_next,
            Some((target, _)) if target.as_deref().map_or(true, |t| t == method)
        );
        if let Some((_, mode)) = state.fail_next.take_if(|_| armed) {
            debug!(method, ?mode, "injected project service failure");
            return Err(match mode {
                FailureMode::Transport => {
                    BoardError::transport(format!("{method}: connection reset"))
                }
                FailureMode::Validation(message) => BoardError::validation(message),
                FailureMode::NotFound => BoardError::not_found("board", project_id.as_str()),
            });
        }

        let mut board = state
            .boards
            .get(project_id)
            .cloned()
            .ok_or_else(|| BoardError::not_found("board", project_id.as_str()))?;
        let value = f(&mut board)?;
        state.boards.insert(project_id.clone(), board);
        Ok(value)
    }
}

#[async_trait]
impl ProjectService for InMemoryProjectService {
    async fn fetch_board(&self, project_id: &ProjectId) -> Result<Board> {
        self.call("fetch_board", project_id, |board| Ok(board.clone()))
    }

    async fn create_column(&self, project_id: &ProjectId, name: &str) -> Result<Column> {
        require_name("column", name)?;
        self.call("create_column", project_id, |board| {
            let column_id = ColumnId::new();
            apply(
                board,
                BoardCommand::CreateColumn {
                    column_id: column_id.clone(),
                    name: name.to_string(),
                },
            )?;
            Ok(board.require_column(&column_id)?.clone())
        })
    }

    async fn update_column(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        patch: &ColumnPatch,
    ) -> Result<Column> {
        self.call("update_column", project_id, |board| {
            apply(
                board,
                BoardCommand::UpdateColumn {
                    column_id: column_id.clone(),
                    patch: patch.clone(),
                },
            )?;
            Ok(board.require_column(column_id)?.clone())
        })
    }

    async fn clear_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()> {
        self.call("clear_column", project_id, |board| {
            apply(
                board,
                BoardCommand::ClearColumn {
                    column_id: column_id.clone(),
                },
            )
        })
    }

    async fn delete_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()> {
        self.call("delete_column", project_id, |board| {
            apply(
                board,
                BoardCommand::DeleteColumn {
                    column_id: column_id.clone(),
                },
            )
        })
    }

    async fn create_task(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        name: &str,
    ) -> Result<Task> {
        require_name("task", name)?;
        self.call("create_task", project_id, |board| {
            let task_id = TaskId::new();
            apply(
                board,
                BoardCommand::CreateTask {
                    column_id: column_id.clone(),
                    task_id: task_id.clone(),
                    name: name.to_string(),
                    author_id: Some(self.author.clone()),
                },
            )?;
            if !self.task_defaults.is_empty() {
                apply(
                    board,
                    BoardCommand::UpdateTask {
                        task_id: task_id.clone(),
                        patch: self.task_defaults.clone(),
                    },
                )?;
            }
            Ok(board.require_task(&task_id)?.clone())
        })
    }

    async fn update_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Task> {
        if let Some(name) = &patch.name {
            require_name("task", name)?;
        }
        self.call("update_task", project_id, |board| {
            apply(
                board,
                BoardCommand::UpdateTask {
                    task_id: task_id.clone(),
                    patch: patch.clone(),
                },
            )?;
            Ok(board.require_task(task_id)?.clone())
        })
    }

    async fn move_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        position: usize,
        column_id: Option<&ColumnId>,
    ) -> Result<()> {
        self.call("move_task", project_id, |board| {
            apply(
                board,
                BoardCommand::move_task(task_id.clone(), position, column_id.cloned()),
            )
        })
    }

    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> Result<()> {
        self.call("delete_task", project_id, |board| {
            apply(
                board,
                BoardCommand::DeleteTask {
                    task_id: task_id.clone(),
                },
            )
        })
    }

    async fn add_comment(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        message: &str,
    ) -> Result<Comment> {
        if message.trim().is_empty() {
            return Err(BoardError::validation("comment message is required"));
        }
        self.call("add_comment", project_id, |board| {
            let comment = Comment {
                id: CommentId::new(),
                message: message.to_string(),
                author_id: self.author.clone(),
                created_at: Utc::now(),
            };
            apply(
                board,
                BoardCommand::AddComment {
                    task_id: task_id.clone(),
                    comment: comment.clone(),
                },
            )?;
            Ok(comment)
        })
    }

    async fn add_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        name: &str,
    ) -> Result<Checklist> {
        require_name("checklist", name)?;
        self.call("add_checklist", project_id, |board| {
            let checklist = Checklist::new(ChecklistId::new(), name);
            apply(
                board,
                BoardCommand::AddChecklist {
                    task_id: task_id.clone(),
                    checklist: checklist.clone(),
                },
            )?;
            Ok(checklist)
        })
    }

    async fn update_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        patch: &ChecklistPatch,
    ) -> Result<Checklist> {
        self.call("update_checklist", project_id, |board| {
            apply(
                board,
                BoardCommand::UpdateChecklist {
                    task_id: task_id.clone(),
                    checklist_id: checklist_id.clone(),
                    patch: patch.clone(),
                },
            )?;
            board
                .require_task(task_id)?
                .find_checklist(checklist_id)
                .cloned()
                .ok_or_else(|| BoardError::ChecklistNotFound {
                    id: checklist_id.to_string(),
                })
        })
    }

    async fn delete_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
    ) -> Result<()> {
        self.call("delete_checklist", project_id, |board| {
            apply(
                board,
                BoardCommand::DeleteChecklist {
                    task_id: task_id.clone(),
                    checklist_id: checklist_id.clone(),
                },
            )
        })
    }

    async fn add_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        name: &str,
    ) -> Result<CheckItem> {
        require_name("check item", name)?;
        self.call("add_check_item", project_id, |board| {
            let check_item = CheckItem::new(CheckItemId::new(), name);
            apply(
                board,
                BoardCommand::AddCheckItem {
                    task_id: task_id.clone(),
                    checklist_id: checklist_id.clone(),
                    check_item: check_item.clone(),
                },
            )?;
            Ok(check_item)
        })
    }

    async fn update_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
        patch: &CheckItemPatch,
    ) -> Result<CheckItem> {
        self.call("update_check_item", project_id, |board| {
            apply(
                board,
                BoardCommand::UpdateCheckItem {
                    task_id: task_id.clone(),
                    checklist_id: checklist_id.clone(),
                    check_item_id: check_item_id.clone(),
                    patch: patch.clone(),
                },
            )?;
            board
                .require_task(task_id)?
                .find_checklist(checklist_id)
                .and_then(|checklist| checklist.find_item(check_item_id))
                .cloned()
                .ok_or_else(|| BoardError::CheckItemNotFound {
                    id: check_item_id.to_string(),
                })
        })
    }

    async fn delete_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
    ) -> Result<()> {
        self.call("delete_check_item", project_id, |board| {
            apply(
                board,
                BoardCommand::DeleteCheckItem {
                    task_id: task_id.clone(),
                    checklist_id: checklist_id.clone(),
                    check_item_id: check_item_id.clone(),
                },
            )
        })
    }
}
