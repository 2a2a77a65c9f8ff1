//! # ProjectBoard Operations
//!
//! This crate provides the `Operation` trait for defining board operations.
//! Operations are structs whose serialized fields are the operation input.
//!
//! ## Example
//!
//! ```ignore
//! use projectboard_operations::*;
//!
//! #[operation(verb = "add", noun = "column", description = "Create a new column")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddColumn {
//!     /// The column name
//!     pub name: String,
//! }
//!
//! #[async_trait]
//! impl Execute<SyncContext, BoardError> for AddColumn {
//!     async fn execute(&self, ctx: &SyncContext) -> ExecutionResult<Value, BoardError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

// Lets the generated `projectboard_operations::...` paths resolve inside this crate's tests.
extern crate self as projectboard_operations;

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use projectboard_operations_macros::operation;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
