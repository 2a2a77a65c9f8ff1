//! Task reducers

use crate::error::{BoardError, Result};
use crate::types::{Board, ColumnId, MemberId, Task, TaskId, TaskPatch};

pub(super) fn create(
    board: &mut Board,
    column_id: &ColumnId,
    task_id: TaskId,
    name: String,
    author_id: Option<MemberId>,
) -> Result<()> {
    if board.tasks.contains_key(&task_id) {
        return Err(BoardError::duplicate_id("task", task_id.to_string()));
    }
    let column = board.require_column_mut(column_id)?;
    column.task_ids.push(task_id.clone());

    let mut task = Task::new(task_id.clone(), column_id.clone(), name);
    task.author_id = author_id;
    board.tasks.insert(task_id, task);
    Ok(())
}

pub(super) fn update(board: &mut Board, task_id: &TaskId, patch: &TaskPatch) -> Result<()> {
    let task = board.require_task_mut(task_id)?;
    patch.apply(task);
    Ok(())
}

pub(super) fn delete(board: &mut Board, task_id: &TaskId) -> Result<()> {
    let task = board
        .tasks
        .remove(task_id)
        .ok_or_else(|| BoardError::TaskNotFound {
            id: task_id.to_string(),
        })?;
    if let Some(column) = board.columns.get_mut(&task.column_id) {
        column.task_ids.retain(|id| id != task_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::BoardError;
    use crate::store::{reduce, BoardCommand};
    use crate::types::{Board, Column, MemberId, Task, TaskId, TaskPatch};

    fn board() -> Board {
        Board::from_parts(
            vec![],
            vec![
                Column::new("todo", "Todo").with_tasks(vec!["a".into(), "b".into()]),
                Column::new("done", "Done"),
            ],
            vec![
                Task::new("a", "todo", "A").with_assignees(vec!["m1".into()]),
                Task::new("b", "todo", "B"),
            ],
        )
    }

    #[test]
    fn test_create_task_appends_to_column() {
        let next = reduce(
            &board(),
            BoardCommand::CreateTask {
                column_id: "todo".into(),
                task_id: "c".into(),
                name: "C".into(),
                author_id: Some("m1".into()),
            },
        )
        .unwrap();

        let column = next.column(&"todo".into()).unwrap();
        assert_eq!(column.task_ids.last().unwrap(), "c");
        let task = next.task(&"c".into()).unwrap();
        assert_eq!(task.column_id, "todo");
        assert!(task.checklists.is_empty() && task.comments.is_empty());
        assert_eq!(task.author_id, Some(MemberId::from("m1")));
    }

    #[test]
    fn test_create_task_missing_column() {
        let err = reduce(&board(), BoardCommand::create_task("nope", "X")).unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_create_task_duplicate_id() {
        let err = reduce(
            &board(),
            BoardCommand::CreateTask {
                column_id: "done".into(),
                task_id: "a".into(),
                name: "dup".into(),
                author_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateId { .. }));
    }

    #[test]
    fn test_update_task_merges_fields() {
        let next = reduce(
            &board(),
            BoardCommand::UpdateTask {
                task_id: "a".into(),
                patch: TaskPatch::new()
                    .with_description("details")
                    .with_labels(vec!["bug".into()]),
            },
        )
        .unwrap();
        let task = next.task(&"a".into()).unwrap();
        assert_eq!(task.name, "A");
        assert_eq!(task.description, "details");
        assert_eq!(task.labels, vec!["bug".to_string()]);
    }

    #[test]
    fn test_update_task_existing_assignee_is_not_duplicated() {
        let next = reduce(
            &board(),
            BoardCommand::UpdateTask {
                task_id: "a".into(),
                patch: TaskPatch::new().with_assignees(vec!["m1".into(), "m1".into()]),
            },
        )
        .unwrap();
        assert_eq!(
            next.task(&"a".into()).unwrap().assignees_ids,
            vec![MemberId::from("m1")]
        );
    }

    #[test]
    fn test_update_missing_task() {
        let err = reduce(
            &board(),
            BoardCommand::UpdateTask {
                task_id: "zzz".into(),
                patch: TaskPatch::new().with_name("x"),
            },
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
    }

    #[test]
    fn test_delete_task() {
        let next = reduce(&board(), BoardCommand::DeleteTask { task_id: "a".into() }).unwrap();
        assert!(next.task(&"a".into()).is_none());
        let column = next.column(&"todo".into()).unwrap();
        assert_eq!(column.task_ids, vec![TaskId::from("b")]);
    }

    #[test]
    fn test_delete_absent_task_leaves_board_unchanged() {
        let start = board();
        let err = reduce(&start, BoardCommand::DeleteTask { task_id: "zzz".into() }).unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
        assert_eq!(start, board());
    }
}
