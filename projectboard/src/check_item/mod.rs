//! Check item operations

mod add;
mod delete;
mod toggle;
mod update;

pub use add::AddCheckItem;
pub use delete::DeleteCheckItem;
pub use toggle::ToggleCheckItem;
pub use update::UpdateCheckItem;

use crate::context::SyncContext;
use crate::error::Result;
use crate::store::BoardCommand;
use crate::types::{CheckItem, CheckItemPatch, ChecklistId, TaskId};

/// Mirror a check item as the service returned it
async fn apply_confirmed(
    ctx: &SyncContext,
    task_id: &TaskId,
    checklist_id: &ChecklistId,
    confirmed: &CheckItem,
) -> Result<CheckItem> {
    ctx.apply(BoardCommand::UpdateCheckItem {
        task_id: task_id.clone(),
        checklist_id: checklist_id.clone(),
        check_item_id: confirmed.id.clone(),
        patch: CheckItemPatch::from_item(confirmed),
    })
    .await?;
    ctx.check_item(task_id, checklist_id, &confirmed.id).await
}
