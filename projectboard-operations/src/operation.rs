//! The `Operation` metadata trait and the `Execute` trait

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Static metadata describing an operation.
///
/// Implemented by the `#[operation]` attribute macro.
pub trait Operation {
    /// The verb, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The noun, e.g. "task"
    fn noun(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Canonical op string used in activity logs ("move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation
where
    C: Send + Sync,
    E: Send,
{
    /// Run the operation
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Ids of the resources this operation touches, recorded alongside its log entry
    fn affected_resources(&self) -> Vec<String> {
        Vec::new()
    }
}
