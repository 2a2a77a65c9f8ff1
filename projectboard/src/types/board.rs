//! Board-level types: Board, Column, Member
//!
//! The board is normalized: columns, tasks and members live in id-keyed maps,
//! and display order lives in explicit id lists (`column_order` and each
//! column's `task_ids`). The maps own entity fields; the lists own sequence.

use super::ids::{ChecklistId, ColumnId, MemberId, TaskId};
use super::task::Task;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A column: a named, ordered bucket of task ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(alias = "_id")]
    pub id: ColumnId,
    pub name: String,
    /// Task ids in display order
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            task_ids: Vec::new(),
        }
    }

    /// Set the task order
    pub fn with_tasks(mut self, task_ids: Vec<TaskId>) -> Self {
        self.task_ids = task_ids;
        self
    }

    /// Index of a task in this column
    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}

/// A board member, used for display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(alias = "_id")]
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

/// The kanban board for one project.
///
/// Serialized as the list form the project service uses:
/// `{ "members": [...], "columns": [...], "tasks": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoardWire", into = "BoardWire")]
pub struct Board {
    pub(crate) members: HashMap<MemberId, Member>,
    pub(crate) columns: HashMap<ColumnId, Column>,
    pub(crate) column_order: Vec<ColumnId>,
    pub(crate) tasks: HashMap<TaskId, Task>,
}

#[derive(Serialize, Deserialize)]
struct BoardWire {
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl From<BoardWire> for Board {
    fn from(wire: BoardWire) -> Self {
        Board::from_parts(wire.members, wire.columns, wire.tasks)
    }
}

impl From<Board> for BoardWire {
    fn from(mut board: Board) -> Self {
        let mut members: Vec<Member> = board.members.into_values().collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));

        // Tasks go out in column order so the payload is deterministic
        let mut tasks = Vec::with_capacity(board.tasks.len());
        let mut columns = Vec::with_capacity(board.column_order.len());
        for column_id in &board.column_order {
            if let Some(column) = board.columns.remove(column_id) {
                for task_id in &column.task_ids {
                    if let Some(task) = board.tasks.remove(task_id) {
                        tasks.push(task);
                    }
                }
                columns.push(column);
            }
        }
        let mut orphans: Vec<Task> = board.tasks.into_values().collect();
        orphans.sort_by(|a, b| a.id.cmp(&b.id));
        tasks.extend(orphans);

        BoardWire {
            members,
            columns,
            tasks,
        }
    }
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from entity lists. Column list order becomes the
    /// board's column order. No invariants are checked here; see
    /// [`Board::check_invariants`].
    pub fn from_parts(members: Vec<Member>, columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
            columns: columns.into_iter().map(|c| (c.id.clone(), c)).collect(),
            column_order,
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Column ids in display order
    pub fn column_ids(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// All tasks, unordered
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// All members, unordered
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks of a column in display order
    pub fn tasks_in_column(&self, id: &ColumnId) -> Result<Vec<&Task>> {
        let column = self
            .columns
            .get(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        Ok(column
            .task_ids
            .iter()
            .filter_map(|task_id| self.tasks.get(task_id))
            .collect())
    }

    /// Members assigned to a task, in assignment order. Ids without a member
    /// record are skipped.
    pub fn assignees(&self, task_id: &TaskId) -> Result<Vec<&Member>> {
        let task = self.require_task(task_id)?;
        Ok(task
            .assignees_ids
            .iter()
            .filter_map(|id| self.members.get(id))
            .collect())
    }

    /// The member who created a task, when known
    pub fn author(&self, task_id: &TaskId) -> Result<Option<&Member>> {
        let task = self.require_task(task_id)?;
        Ok(task.author_id.as_ref().and_then(|id| self.members.get(id)))
    }

    /// Column currently holding a task
    pub fn column_of(&self, task_id: &TaskId) -> Result<&Column> {
        let task = self.require_task(task_id)?;
        self.columns
            .get(&task.column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: task.column_id.to_string(),
            })
    }

    pub(crate) fn require_task(&self, id: &TaskId) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    pub(crate) fn require_task_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    pub(crate) fn require_column(&self, id: &ColumnId) -> Result<&Column> {
        self.columns
            .get(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    pub(crate) fn require_column_mut(&mut self, id: &ColumnId) -> Result<&mut Column> {
        self.columns
            .get_mut(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Verify the map/order-list invariants:
    ///
    /// - `column_order` and the column map hold the same ids, without repeats
    /// - every id in a column's list exists in the task map
    /// - each task id appears in exactly one column list
    /// - each task's `column_id` names the column whose list holds it
    /// - checklist ids are unique per task, check item ids unique per checklist
    pub fn check_invariants(&self) -> Result<()> {
        let mut ordered = HashSet::with_capacity(self.column_order.len());
        for id in &self.column_order {
            if !ordered.insert(id) {
                return Err(BoardError::inconsistent(format!(
                    "column {} appears twice in the column order",
                    id
                )));
            }
            if !self.columns.contains_key(id) {
                return Err(BoardError::inconsistent(format!(
                    "column order references missing column {}",
                    id
                )));
            }
        }
        if ordered.len() != self.columns.len() {
            return Err(BoardError::inconsistent(
                "column map holds columns missing from the column order",
            ));
        }

        let mut owner: HashMap<&TaskId, &ColumnId> = HashMap::with_capacity(self.tasks.len());
        for column in self.columns() {
            for task_id in &column.task_ids {
                let task = self.tasks.get(task_id).ok_or_else(|| {
                    BoardError::inconsistent(format!(
                        "column {} references missing task {}",
                        column.id, task_id
                    ))
                })?;
                if owner.insert(task_id, &column.id).is_some() {
                    return Err(BoardError::inconsistent(format!(
                        "task {} is listed more than once",
                        task_id
                    )));
                }
                if task.column_id != column.id {
                    return Err(BoardError::inconsistent(format!(
                        "task {} claims column {} but is listed in {}",
                        task_id, task.column_id, column.id
                    )));
                }
            }
        }
        if owner.len() != self.tasks.len() {
            return Err(BoardError::inconsistent(
                "task map holds tasks not listed in any column",
            ));
        }

        for task in self.tasks.values() {
            let mut checklist_ids: HashSet<&ChecklistId> = HashSet::new();
            for checklist in &task.checklists {
                if !checklist_ids.insert(&checklist.id) {
                    return Err(BoardError::inconsistent(format!(
                        "task {} has duplicate checklist {}",
                        task.id, checklist.id
                    )));
                }
                let mut item_ids = HashSet::new();
                if !checklist.check_items.iter().all(|i| item_ids.insert(&i.id)) {
                    return Err(BoardError::inconsistent(format!(
                        "checklist {} has duplicate check items",
                        checklist.id
                    )));
                }
            }
        }

        Ok(())
    }
}
