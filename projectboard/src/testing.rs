//! Shared fixtures for unit tests

use crate::board::LoadBoard;
use crate::service::InMemoryProjectService;
use crate::types::{Board, CheckItem, Checklist, Column, Member, Task};
use crate::{Execute, SyncContext};
use std::sync::Arc;

/// todo: [t1, t2], doing: [], done: [t3]; t1 carries checklist l1 with items i1, i2
pub(crate) fn board() -> Board {
    let mut t1 = Task::new("t1", "todo", "Write docs").with_assignees(vec!["m1".into()]);
    let mut checklist = Checklist::new("l1", "Steps");
    checklist.check_items = vec![CheckItem::new("i1", "draft"), CheckItem::new("i2", "review")];
    t1.checklists = vec![checklist];

    Board::from_parts(
        vec![Member::new("m1", "Ada"), Member::new("m2", "Grace")],
        vec![
            Column::new("todo", "Todo").with_tasks(vec!["t1".into(), "t2".into()]),
            Column::new("doing", "Doing"),
            Column::new("done", "Done").with_tasks(vec!["t3".into()]),
        ],
        vec![t1, Task::new("t2", "todo", "Fix bug"), Task::new("t3", "done", "Release")],
    )
}

/// A context loaded from an in-memory service seeded with [`board`].
/// Call counts are reset after the load.
pub(crate) async fn setup() -> (Arc<InMemoryProjectService>, SyncContext) {
    let service = Arc::new(
        InMemoryProjectService::new()
            .with_author("m1")
            .with_board("p1", board()),
    );
    let ctx = SyncContext::new("p1", service.clone());
    LoadBoard::new().execute(&ctx).await.into_result().unwrap();
    service.reset_calls();
    (service, ctx)
}
