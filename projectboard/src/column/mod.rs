//! Column operations

mod add;
mod clear;
mod delete;
mod update;

pub use add::AddColumn;
pub use clear::ClearColumn;
pub use delete::DeleteColumn;
pub use update::UpdateColumn;
