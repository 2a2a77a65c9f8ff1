//! Kanban board core for project boards
//!
//! This crate holds the client-side state of one project's kanban board and
//! keeps it in step with a remote project service.
//!
//! ## Overview
//!
//! - **Board Store** - a normalized snapshot (`types::Board`) changed only by
//!   [`store::BoardCommand`]s through a pure reducer
//! - **Move-Task** - deterministic reordering of task ids within and across columns
//! - **Sync Layer** - operations that call the [`ProjectService`], then mirror
//!   the confirmed result into the store
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use projectboard::{
//!     board::LoadBoard, task::MoveTask, BoardConfig, BoardOperationProcessor,
//!     HttpProjectService, OperationProcessor, SyncContext,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load()?;
//! let service = Arc::new(HttpProjectService::from_config(&config)?);
//! let ctx = SyncContext::new("project-1", service).with_config(config);
//! let processor = BoardOperationProcessor::new();
//!
//! processor.process(&LoadBoard::new(), &ctx).await?;
//! processor
//!     .process(&MoveTask::new("task-1", 0).to_column("done"), &ctx)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! The store is never written before the service confirms a change, except
//! for task order: the service does not echo order back, so the client's move
//! is authoritative once the service accepts it.

pub mod config;
mod context;
mod error;
mod processor;
pub mod service;
pub mod store;
pub mod types;

// Operation modules
pub mod board;
pub mod check_item;
pub mod checklist;
pub mod column;
pub mod comment;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use projectboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use config::BoardConfig;
pub use context::{SyncContext, ACTIVITY_LIMIT};
pub use error::{BoardError, ErrorKind, Result};
pub use processor::BoardOperationProcessor;
pub use service::{FailureMode, HttpProjectService, InMemoryProjectService, ProjectService};
pub use store::{BoardCommand, BoardStore, MovePlan};

pub use types::{
    Attachment, Board, CheckItem, CheckItemId, CheckItemPatch, CheckItemState, Checklist,
    ChecklistId, ChecklistPatch, Column, ColumnId, ColumnPatch, Comment, CommentId, Member,
    MemberId, ProjectId, Task, TaskId, TaskPatch,
};
