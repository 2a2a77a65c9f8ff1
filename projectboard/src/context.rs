//! SyncContext - the state an open board shares across operations
//!
//! The context owns the board store of one project, the service handle and
//! the activity log. It provides access, not logic: operations do the work.
//! No store lock is ever held across a service call.

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::service::ProjectService;
use crate::store::{BoardCommand, BoardStore};
use crate::types::{
    Board, CheckItem, CheckItemId, Checklist, ChecklistId, Column, ColumnId, ProjectId, Task,
    TaskId,
};
use projectboard_operations::LogEntry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Most recent activity entries kept in memory
pub const ACTIVITY_LIMIT: usize = 500;

/// Context passed to every sync operation
pub struct SyncContext {
    project_id: ProjectId,
    service: Arc<dyn ProjectService>,
    store: RwLock<BoardStore>,
    config: BoardConfig,
    /// Newest first
    activity: RwLock<Vec<LogEntry>>,
}

impl SyncContext {
    /// Context for `project_id` with an empty board; run `LoadBoard` to fill it
    pub fn new(project_id: impl Into<ProjectId>, service: Arc<dyn ProjectService>) -> Self {
        Self {
            project_id: project_id.into(),
            service,
            store: RwLock::new(BoardStore::default()),
            config: BoardConfig::default(),
            activity: RwLock::new(Vec::new()),
        }
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a known snapshot instead of an empty board
    pub fn with_board(mut self, board: Board) -> Result<Self> {
        self.store = RwLock::new(BoardStore::new(board)?);
        Ok(self)
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn service(&self) -> &dyn ProjectService {
        self.service.as_ref()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Actor recorded on activity entries
    pub fn actor(&self) -> Option<&str> {
        self.config.actor.as_deref()
    }

    // =========================================================================
    // Store access
    // =========================================================================

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> Board {
        self.store.read().await.snapshot().clone()
    }

    /// Store revision; advances only on effective changes
    pub async fn revision(&self) -> u64 {
        self.store.read().await.revision()
    }

    /// Run a read-only query against the current snapshot
    pub async fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(self.store.read().await.snapshot())
    }

    /// Apply a command to the store
    pub async fn apply(&self, command: BoardCommand) -> Result<()> {
        self.store.write().await.apply(command)?;
        Ok(())
    }

    /// Apply a command and read from the resulting snapshot under the same lock
    pub async fn apply_then<R>(
        &self,
        command: BoardCommand,
        f: impl FnOnce(&Board) -> Result<R>,
    ) -> Result<R> {
        let mut store = self.store.write().await;
        let board = store.apply(command)?;
        f(board)
    }

    pub async fn task(&self, id: &TaskId) -> Result<Task> {
        self.read(|board| board.require_task(id).cloned()).await
    }

    pub async fn column(&self, id: &ColumnId) -> Result<Column> {
        self.read(|board| board.require_column(id).cloned()).await
    }

    pub async fn checklist(&self, task_id: &TaskId, checklist_id: &ChecklistId) -> Result<Checklist> {
        self.read(|board| {
            board
                .require_task(task_id)?
                .find_checklist(checklist_id)
                .cloned()
                .ok_or_else(|| BoardError::ChecklistNotFound {
                    id: checklist_id.to_string(),
                })
        })
        .await
    }

    pub async fn check_item(
        &self,
        task_id: &TaskId,
        checklist_id: &ChecklistId,
        check_item_id: &CheckItemId,
    ) -> Result<CheckItem> {
        self.checklist(task_id, checklist_id)
            .await?
            .find_item(check_item_id)
            .cloned()
            .ok_or_else(|| BoardError::CheckItemNotFound {
                id: check_item_id.to_string(),
            })
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Record an entry at the front of the activity log
    pub async fn append_activity(&self, entry: LogEntry) {
        let mut activity = self.activity.write().await;
        activity.insert(0, entry);
        activity.truncate(ACTIVITY_LIMIT);
    }

    /// Activity entries, newest first
    pub async fn activity(&self) -> Vec<LogEntry> {
        self.activity.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::InMemoryProjectService;
    use crate::types::Task;
    use serde_json::json;

    fn board() -> Board {
        Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo").with_tasks(vec!["t1".into()])],
            vec![Task::new("t1", "todo", "Write")],
        )
    }

    fn ctx() -> SyncContext {
        SyncContext::new("p1", Arc::new(InMemoryProjectService::new()))
            .with_board(board())
            .unwrap()
    }

    #[test]
    fn test_with_board_rejects_inconsistent_board() {
        let stray = Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo")],
            vec![Task::new("t1", "todo", "Write")],
        );
        let err = SyncContext::new("p1", Arc::new(InMemoryProjectService::new()))
            .with_board(stray)
            .err()
            .unwrap();
        assert!(matches!(err, BoardError::InconsistentBoard { .. }));
    }

    #[tokio::test]
    async fn test_lookups() {
        let ctx = ctx();
        assert_eq!(ctx.task(&"t1".into()).await.unwrap().name, "Write");
        assert_eq!(ctx.column(&"todo".into()).await.unwrap().len(), 1);
        assert!(matches!(
            ctx.checklist(&"t1".into(), &"l1".into()).await.unwrap_err(),
            BoardError::ChecklistNotFound { .. }
        ));
        assert!(ctx.task(&"nope".into()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_apply_advances_revision() {
        let ctx = ctx();
        assert_eq!(ctx.revision().await, 0);
        ctx.apply(BoardCommand::create_column("Done")).await.unwrap();
        assert_eq!(ctx.revision().await, 1);

        let err = ctx
            .apply(BoardCommand::DeleteTask { task_id: "nope".into() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ctx.revision().await, 1);
    }

    #[tokio::test]
    async fn test_activity_newest_first_and_bounded() {
        let ctx = ctx();
        for i in 0..ACTIVITY_LIMIT + 5 {
            ctx.append_activity(LogEntry::new("add task", json!({ "n": i }), json!({}), None, 0))
                .await;
        }
        let activity = ctx.activity().await;
        assert_eq!(activity.len(), ACTIVITY_LIMIT);
        assert_eq!(activity[0].input["n"], ACTIVITY_LIMIT + 4);
    }
}
