//! Translate drag-and-drop results into moves

use super::MoveTask;
use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A column slot reported by a drag-and-drop surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    #[serde(alias = "droppableId")]
    pub column_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

/// The end of a drag gesture. `destination` is `None` when the task was
/// dropped outside any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    #[serde(alias = "draggableId")]
    pub task_id: TaskId,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragResult {
    /// The move this drop asks for, if any.
    ///
    /// Drops outside a column or back onto the starting slot produce nothing.
    /// Drops in the same column move without naming a column.
    pub fn into_move(self) -> Option<MoveTask> {
        let destination = self.destination?;
        if destination == self.source {
            return None;
        }

        let mv = MoveTask::new(self.task_id, destination.index);
        if destination.column_id == self.source.column_id {
            Some(mv)
        } else {
            Some(mv.to_column(destination.column_id))
        }
    }
}

impl From<DragResult> for Option<MoveTask> {
    fn from(result: DragResult) -> Self {
        result.into_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(source: (&str, usize), destination: Option<(&str, usize)>) -> DragResult {
        DragResult {
            task_id: "t1".into(),
            source: DragLocation::new(source.0, source.1),
            destination: destination.map(|(column, index)| DragLocation::new(column, index)),
        }
    }

    #[test]
    fn test_dropped_outside() {
        assert_eq!(drag(("todo", 0), None).into_move(), None);
    }

    #[test]
    fn test_dropped_in_place() {
        assert_eq!(drag(("todo", 2), Some(("todo", 2))).into_move(), None);
    }

    #[test]
    fn test_same_column_omits_column() {
        let mv = drag(("todo", 0), Some(("todo", 3))).into_move().unwrap();
        assert_eq!(mv, MoveTask::new("t1", 3));
        assert!(mv.column.is_none());
    }

    #[test]
    fn test_other_column() {
        let mv: Option<MoveTask> = drag(("todo", 0), Some(("done", 1))).into();
        assert_eq!(mv, Some(MoveTask::new("t1", 1).to_column("done")));
    }

    #[test]
    fn test_deserialize_library_shape() {
        let result: DragResult = serde_json::from_str(
            r#"{
                "draggableId": "t1",
                "source": { "droppableId": "todo", "index": 0 },
                "destination": { "droppableId": "done", "index": 2 }
            }"#,
        )
        .unwrap();
        assert_eq!(result.destination.unwrap().column_id, "done");

        let outside: DragResult = serde_json::from_str(
            r#"{ "draggableId": "t1", "source": { "droppableId": "todo", "index": 0 }, "destination": null }"#,
        )
        .unwrap();
        assert!(outside.into_move().is_none());
    }
}
