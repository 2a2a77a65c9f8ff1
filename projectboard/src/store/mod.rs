//! Board store: the normalized board snapshot and its pure reducer
//!
//! [`reduce`] takes a snapshot and a [`BoardCommand`] and returns the next
//! snapshot. Handlers work on a private copy, so a failing command leaves the
//! caller's snapshot exactly as it was.

mod checklist;
mod column;
mod command;
mod comment;
mod mv;
mod task;

pub use command::BoardCommand;
pub use mv::{is_noop_move, plan_move, MovePlan};

use crate::error::Result;
use crate::types::Board;
use tracing::debug;

/// Apply one command to a snapshot, producing the next snapshot
pub fn reduce(board: &Board, command: BoardCommand) -> Result<Board> {
    let mut next = board.clone();

    match command {
        BoardCommand::Load { board } => {
            board.check_invariants()?;
            next = board;
        }
        BoardCommand::CreateColumn { column_id, name } => {
            column::create(&mut next, column_id, name)?
        }
        BoardCommand::UpdateColumn { column_id, patch } => {
            column::update(&mut next, &column_id, &patch)?
        }
        BoardCommand::ClearColumn { column_id } => column::clear(&mut next, &column_id)?,
        BoardCommand::DeleteColumn { column_id } => column::delete(&mut next, &column_id)?,
        BoardCommand::CreateTask {
            column_id,
            task_id,
            name,
            author_id,
        } => task::create(&mut next, &column_id, task_id, name, author_id)?,
        BoardCommand::UpdateTask { task_id, patch } => task::update(&mut next, &task_id, &patch)?,
        BoardCommand::MoveTask {
            task_id,
            position,
            column_id,
        } => {
            let plan = plan_move(&next, &task_id, position, column_id.as_ref())?;
            mv::apply(&mut next, &plan);
        }
        BoardCommand::DeleteTask { task_id } => task::delete(&mut next, &task_id)?,
        BoardCommand::AddChecklist { task_id, checklist } => {
            checklist::add_checklist(&mut next, &task_id, checklist)?
        }
        BoardCommand::UpdateChecklist {
            task_id,
            checklist_id,
            patch,
        } => checklist::update_checklist(&mut next, &task_id, &checklist_id, &patch)?,
        BoardCommand::DeleteChecklist {
            task_id,
            checklist_id,
        } => checklist::delete_checklist(&mut next, &task_id, &checklist_id)?,
        BoardCommand::AddCheckItem {
            task_id,
            checklist_id,
            check_item,
        } => checklist::add_check_item(&mut next, &task_id, &checklist_id, check_item)?,
        BoardCommand::UpdateCheckItem {
            task_id,
            checklist_id,
            check_item_id,
            patch,
        } => checklist::update_check_item(&mut next, &task_id, &checklist_id, &check_item_id, &patch)?,
        BoardCommand::DeleteCheckItem {
            task_id,
            checklist_id,
            check_item_id,
        } => checklist::delete_check_item(&mut next, &task_id, &checklist_id, &check_item_id)?,
        BoardCommand::AddComment { task_id, comment } => {
            comment::add(&mut next, &task_id, comment)?
        }
    }

    next.check_invariants()?;
    Ok(next)
}

/// Owns the board snapshot of one open project board.
///
/// The revision counter advances only when a command actually changes the
/// snapshot, so callers can cheaply detect no-ops.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    board: Board,
    revision: u64,
}

impl BoardStore {
    /// Create a store around an initial snapshot.
    ///
    /// Fails with `InconsistentBoard` when the snapshot breaks the board
    /// invariants.
    pub fn new(board: Board) -> Result<Self> {
        board.check_invariants()?;
        Ok(Self { board, revision: 0 })
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Board {
        &self.board
    }

    /// Number of effective changes applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a command. On error the snapshot and revision are unchanged.
    pub fn apply(&mut self, command: BoardCommand) -> Result<&Board> {
        let name = command.name();
        let next = reduce(&self.board, command)?;
        if next != self.board {
            self.board = next;
            self.revision += 1;
            debug!(command = name, revision = self.revision, "board store updated");
        } else {
            debug!(command = name, "board store unchanged");
        }
        Ok(&self.board)
    }

    /// Swap in a whole snapshot, the same as applying `Load`
    pub fn replace(&mut self, board: Board) -> Result<&Board> {
        self.apply(BoardCommand::Load { board })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::types::{Column, Task};

    fn board() -> Board {
        Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo").with_tasks(vec!["a".into()])],
            vec![Task::new("a", "todo", "A")],
        )
    }

    #[test]
    fn test_apply_advances_revision() {
        let mut store = BoardStore::new(board()).unwrap();
        store
            .apply(BoardCommand::create_task("todo", "B"))
            .unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.snapshot().task_count(), 2);
    }

    #[test]
    fn test_failed_apply_leaves_store_unchanged() {
        let mut store = BoardStore::new(board()).unwrap();
        let before = store.snapshot().clone();

        let err = store
            .apply(BoardCommand::DeleteTask {
                task_id: "missing".into(),
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_noop_apply_keeps_revision() {
        let mut store = BoardStore::new(board()).unwrap();
        store
            .apply(BoardCommand::move_task("a", 0, None))
            .unwrap();
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_load_replaces_snapshot() {
        let mut store = BoardStore::default();
        store
            .apply(BoardCommand::Load { board: board() })
            .unwrap();
        assert_eq!(store.snapshot().task_count(), 1);
    }

    #[test]
    fn test_replace_keeps_revision_for_same_board() {
        let mut store = BoardStore::new(board()).unwrap();
        store.replace(board()).unwrap();
        assert_eq!(store.revision(), 0);

        store.replace(Board::new()).unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.snapshot().task_count(), 0);
    }

    #[test]
    fn test_new_rejects_inconsistent_board() {
        let stray = Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo")],
            vec![Task::new("b", "todo", "B")],
        );
        let err = BoardStore::new(stray).unwrap_err();
        assert!(matches!(err, BoardError::InconsistentBoard { .. }));
    }

    #[test]
    fn test_reduce_reports_inconsistent_input() {
        let stray = Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo")],
            vec![Task::new("b", "todo", "B")],
        );
        let err = reduce(&stray, BoardCommand::create_column("Done")).unwrap_err();
        assert!(matches!(err, BoardError::InconsistentBoard { .. }));
    }

    #[test]
    fn test_load_rejects_inconsistent_board() {
        let bad = Board::from_parts(
            vec![],
            vec![Column::new("todo", "Todo").with_tasks(vec!["ghost".into()])],
            vec![],
        );
        let mut store = BoardStore::default();
        let err = store.apply(BoardCommand::Load { board: bad }).unwrap_err();
        assert!(matches!(err, BoardError::InconsistentBoard { .. }));
        assert_eq!(store.snapshot().task_count(), 0);
    }
}
