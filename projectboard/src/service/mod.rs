//! The remote project service the sync layer talks to
//!
//! Every call is one request/response unit scoped by a [`ProjectId`]. The
//! service owns id assignment, authorship and timestamps; the sync layer
//! mirrors what it returns into the local board store.

mod http;
mod memory;

pub use http::HttpProjectService;
pub use memory::{FailureMode, InMemoryProjectService};

use crate::error::Result;
use crate::types::{
    Board, CheckItem, CheckItemId, CheckItemPatch, Checklist, ChecklistId, ChecklistPatch, Column,
    ColumnId, ColumnPatch, Comment, ProjectId, Task, TaskId, TaskPatch,
};
use async_trait::async_trait;

/// Remote collaborator for one or more project boards
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Full snapshot, used when a board is opened
    async fn fetch_board(&self, project_id: &ProjectId) -> Result<Board>;

    async fn create_column(&self, project_id: &ProjectId, name: &str) -> Result<Column>;

    async fn update_column(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        patch: &ColumnPatch,
    ) -> Result<Column>;

    /// Delete every task in the column
    async fn clear_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()>;

    async fn delete_column(&self, project_id: &ProjectId, column_id: &ColumnId) -> Result<()>;

    async fn create_task(
        &self,
        project_id: &ProjectId,
        column_id: &ColumnId,
        name: &str,
    ) -> Result<Task>;

    async fn update_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Task>;

    /// Returns nothing; the client-side order is authoritative once sent
    async fn move_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        position: usize,
        column_id: Option<&ColumnId>,
    ) -> Result<()>;

    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> Result<()>;

    async fn add_comment(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        message: &str,
    ) -> Result<Comment>;

    async fn add_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        name: &str,
    ) -> Result<Checklist>;

    async fn update_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        patch: &ChecklistPatch,
    ) -> Result<Checklist>;

    async fn delete_checklist(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
    ) -> Result<()>;

    async fn add_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        name: &str,
    ) -> Result<CheckItem>;

    async fn update_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
        patch: &CheckItemPatch,
    ) -> Result<CheckItem>;

    async fn delete_check_item(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
    ) -> Result<()>;
}
