//! Comment operations

mod add;

pub use add::AddComment;
