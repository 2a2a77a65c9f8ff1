//! Checklist operations

mod add;
mod delete;
mod update;

pub use add::AddChecklist;
pub use delete::DeleteChecklist;
pub use update::UpdateChecklist;
