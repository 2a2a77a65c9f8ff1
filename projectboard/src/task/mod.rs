//! Task operations

mod add;
mod assign;
mod delete;
mod drag;
mod mv;
mod subscribe;
mod unassign;
mod update;

pub use add::AddTask;
pub use assign::AssignTask;
pub use delete::DeleteTask;
pub use drag::{DragLocation, DragResult};
pub use mv::MoveTask;
pub use subscribe::SubscribeTask;
pub use unassign::UnassignTask;
pub use update::UpdateTask;

use crate::context::SyncContext;
use crate::error::Result;
use crate::store::BoardCommand;
use crate::types::{Task, TaskPatch};

/// Mirror a task as returned by the service into the store
async fn apply_confirmed(ctx: &SyncContext, confirmed: &Task) -> Result<Task> {
    ctx.apply_then(
        BoardCommand::UpdateTask {
            task_id: confirmed.id.clone(),
            patch: TaskPatch::from_task(confirmed),
        },
        |board| board.require_task(&confirmed.id).cloned(),
    )
    .await
}
