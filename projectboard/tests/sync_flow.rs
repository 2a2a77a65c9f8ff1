//! End-to-end sync against the in-memory project service

use projectboard::{
    board::{GetBoard, LoadBoard},
    check_item::{AddCheckItem, ToggleCheckItem},
    checklist::AddChecklist,
    column::{AddColumn, DeleteColumn},
    comment::AddComment,
    task::{AddTask, AssignTask, DeleteTask, DragLocation, DragResult, MoveTask, UpdateTask},
    Board, BoardConfig, BoardError, BoardOperationProcessor, Column, ColumnId, ErrorKind,
    FailureMode,
    InMemoryProjectService, Member, OperationProcessor, ProjectId, SyncContext, Task, TaskId,
};
use std::sync::Arc;
use tracing_test::traced_test;

fn seed() -> Board {
    Board::from_parts(
        vec![Member::new("m1", "Ada"), Member::new("m2", "Grace")],
        vec![
            Column::new("todo", "Todo").with_tasks(vec!["t1".into(), "t2".into()]),
            Column::new("done", "Done"),
        ],
        vec![
            Task::new("t1", "todo", "Write docs"),
            Task::new("t2", "todo", "Fix bug"),
        ],
    )
}

async fn connect() -> (Arc<InMemoryProjectService>, SyncContext, BoardOperationProcessor) {
    let service = Arc::new(
        InMemoryProjectService::new()
            .with_author("m1")
            .with_board("p1", seed()),
    );
    let ctx = SyncContext::new("p1", service.clone())
        .with_config(BoardConfig::default().with_actor("ada@example.com"));
    let processor = BoardOperationProcessor::new();
    processor.process(&LoadBoard::new(), &ctx).await.unwrap();
    (service, ctx, processor)
}

fn order(board: &Board, column: &str) -> Vec<String> {
    board
        .column(&ColumnId::from(column))
        .unwrap()
        .task_ids
        .iter()
        .map(|id| id.to_string())
        .collect()
}

#[tokio::test]
async fn test_local_board_follows_service() {
    let (service, ctx, processor) = connect().await;

    let review = processor
        .process(&AddColumn::new("Review"), &ctx)
        .await
        .unwrap();
    let review_id = review["id"].as_str().unwrap().to_string();

    let task = processor
        .process(&AddTask::new("todo", "Ship it"), &ctx)
        .await
        .unwrap();
    let task_id = task["id"].as_str().unwrap().to_string();

    processor
        .process(
            &UpdateTask::new(task_id.as_str()).with_description("tag and publish"),
            &ctx,
        )
        .await
        .unwrap();
    processor
        .process(&AssignTask::new(task_id.as_str(), "m2"), &ctx)
        .await
        .unwrap();
    processor
        .process(
            &MoveTask::new(task_id.as_str(), 0).to_column(review_id.as_str()),
            &ctx,
        )
        .await
        .unwrap();
    processor
        .process(&MoveTask::new("t2", 0), &ctx)
        .await
        .unwrap();

    let checklist = processor
        .process(&AddChecklist::new(task_id.as_str(), "Release"), &ctx)
        .await
        .unwrap();
    let checklist_id = checklist["id"].as_str().unwrap().to_string();
    let item = processor
        .process(
            &AddCheckItem::new(task_id.as_str(), checklist_id.as_str(), "bump version"),
            &ctx,
        )
        .await
        .unwrap();
    processor
        .process(
            &ToggleCheckItem::new(
                task_id.as_str(),
                checklist_id.as_str(),
                item["id"].as_str().unwrap(),
            ),
            &ctx,
        )
        .await
        .unwrap();
    processor
        .process(&AddComment::new(task_id.as_str(), "ready"), &ctx)
        .await
        .unwrap();
    processor
        .process(&DeleteTask::new("t1"), &ctx)
        .await
        .unwrap();

    let local = ctx.snapshot().await;
    let remote = service.board(&ProjectId::from("p1")).unwrap();
    local.check_invariants().unwrap();

    assert_eq!(order(&local, "todo"), vec!["t2"]);
    assert_eq!(order(&local, review_id.as_str()), vec![task_id.clone()]);
    assert_eq!(order(&local, "todo"), order(&remote, "todo"));
    assert_eq!(
        order(&local, review_id.as_str()),
        order(&remote, review_id.as_str())
    );

    let task_id = TaskId::from(task_id);
    let local_task = local.task(&task_id).unwrap();
    assert_eq!(local_task, remote.task(&task_id).unwrap());
    assert_eq!(local_task.description, "tag and publish");
    assert_eq!(local_task.checklists[0].progress(), (1, 1));
    assert_eq!(local_task.comments[0].author_id, "m1");
}

#[tokio::test]
async fn test_activity_log_newest_first_with_actor() {
    let (_service, ctx, processor) = connect().await;

    processor
        .process(&AddTask::new("todo", "Triage"), &ctx)
        .await
        .unwrap();
    processor
        .process(&MoveTask::new("t1", 1), &ctx)
        .await
        .unwrap();
    // Reads and no-op moves are not recorded
    processor.process(&GetBoard::new(), &ctx).await.unwrap();
    processor
        .process(&MoveTask::new("t1", 1), &ctx)
        .await
        .unwrap();

    let activity = ctx.activity().await;
    let ops: Vec<_> = activity.iter().map(|e| e.op.as_str()).collect();
    assert_eq!(ops, vec!["move task", "add task", "load board"]);
    assert!(activity
        .iter()
        .all(|e| e.actor.as_deref() == Some("ada@example.com")));
    assert_eq!(activity[0].affected, vec!["t1".to_string()]);
}

#[tokio::test]
async fn test_failed_operations_are_logged_and_leave_the_board() {
    let (service, ctx, processor) = connect().await;
    let before = ctx.snapshot().await;
    let revision = ctx.revision().await;

    service.fail_next(FailureMode::Transport);
    let err = processor
        .process(&MoveTask::new("t1", 0).to_column("done"), &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_user_facing());

    let err = processor
        .process(&DeleteColumn::new("todo"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::ColumnNotEmpty { .. }));

    assert_eq!(ctx.snapshot().await, before);
    assert_eq!(ctx.revision().await, revision);

    let activity = ctx.activity().await;
    assert_eq!(activity.len(), 3);
    assert!(activity[0].is_error());
    assert_eq!(activity[0].op, "delete column");
    assert!(activity[1].is_error());
    assert!(activity[1].output["error"].is_string());
}

#[tokio::test]
async fn test_drag_result_drives_a_move() {
    let (service, ctx, processor) = connect().await;

    let drop = DragResult {
        task_id: "t2".into(),
        source: DragLocation::new("todo", 1),
        destination: Some(DragLocation::new("done", 0)),
    };
    let mv = drop.into_move().unwrap();
    processor.process(&mv, &ctx).await.unwrap();

    let local = ctx.snapshot().await;
    assert_eq!(order(&local, "todo"), vec!["t1"]);
    assert_eq!(order(&local, "done"), vec!["t2"]);
    assert_eq!(service.calls("move_task"), 1);
}

#[tokio::test]
#[traced_test]
async fn test_failures_are_traced() {
    let (service, ctx, processor) = connect().await;

    service.fail_next(FailureMode::Validation("name is required".into()));
    let _ = processor
        .process(&AddTask::new("todo", "Anything"), &ctx)
        .await;

    assert!(logs_contain("board operation failed"));
    assert!(logs_contain("board activity"));
}
