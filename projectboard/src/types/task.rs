//! Task types: Task, Checklist, CheckItem, Comment, Attachment

use super::ids::{AttachmentId, CheckItemId, ChecklistId, ColumnId, CommentId, MemberId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: TaskId,

    /// Column whose order list holds this task
    pub column_id: ColumnId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Labels, duplicate-free, in display order
    #[serde(default)]
    pub labels: Vec<String>,

    /// Assigned members, duplicate-free, in assignment order
    #[serde(default)]
    pub assignees_ids: Vec<MemberId>,

    #[serde(default)]
    pub checklists: Vec<Checklist>,

    /// Discussion thread, oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub is_subscribed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<MemberId>,
}

impl Task {
    /// Create a new task with empty sub-collections
    pub fn new(id: impl Into<TaskId>, column_id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            name: name.into(),
            description: String::new(),
            labels: Vec::new(),
            assignees_ids: Vec::new(),
            checklists: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            is_subscribed: false,
            author_id: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<MemberId>) -> Self {
        self.author_id = Some(author.into());
        self
    }

    /// Set labels (duplicates dropped)
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = dedup_preserving_order(labels);
        self
    }

    /// Set assignees (duplicates dropped)
    pub fn with_assignees(mut self, assignees: Vec<MemberId>) -> Self {
        self.assignees_ids = dedup_preserving_order(assignees);
        self
    }

    /// Check whether a member is already assigned
    pub fn is_assigned(&self, member: &MemberId) -> bool {
        self.assignees_ids.contains(member)
    }

    /// Find a checklist by ID
    pub fn find_checklist(&self, id: &ChecklistId) -> Option<&Checklist> {
        self.checklists.iter().find(|c| &c.id == id)
    }

    /// Find a checklist by ID (mutable)
    pub fn find_checklist_mut(&mut self, id: &ChecklistId) -> Option<&mut Checklist> {
        self.checklists.iter_mut().find(|c| &c.id == id)
    }

    /// Find a comment by ID
    pub fn find_comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    /// Completed and total check items across all checklists
    pub fn progress(&self) -> (usize, usize) {
        self.checklists
            .iter()
            .map(Checklist::progress)
            .fold((0, 0), |(done, total), (d, t)| (done + d, total + t))
    }
}

/// A named checklist on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(alias = "_id")]
    pub id: ChecklistId,
    pub name: String,
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

impl Checklist {
    pub fn new(id: impl Into<ChecklistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            check_items: Vec::new(),
        }
    }

    /// Find a check item by ID
    pub fn find_item(&self, id: &CheckItemId) -> Option<&CheckItem> {
        self.check_items.iter().find(|i| &i.id == id)
    }

    /// Find a check item by ID (mutable)
    pub fn find_item_mut(&mut self, id: &CheckItemId) -> Option<&mut CheckItem> {
        self.check_items.iter_mut().find(|i| &i.id == id)
    }

    /// (completed, total) item counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self
            .check_items
            .iter()
            .filter(|i| i.state == CheckItemState::Complete)
            .count();
        (done, self.check_items.len())
    }
}

/// Completion state of a check item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckItemState {
    Complete,
    #[default]
    Incomplete,
}

impl CheckItemState {
    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Self::Complete => Self::Incomplete,
            Self::Incomplete => Self::Complete,
        }
    }
}

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    #[serde(alias = "_id")]
    pub id: CheckItemId,
    pub name: String,
    #[serde(default)]
    pub state: CheckItemState,
}

impl CheckItem {
    pub fn new(id: impl Into<CheckItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: CheckItemState::Incomplete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == CheckItemState::Complete
    }
}

/// A comment on a task. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: CommentId,
    pub message: String,
    pub author_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment stamped with the current time
    pub fn new(id: impl Into<CommentId>, message: impl Into<String>, author: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            author_id: author.into(),
            created_at: Utc::now(),
        }
    }
}

/// A file attached to a task. Attachments arrive with the board and are not
/// edited by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(alias = "_id")]
    pub id: AttachmentId,
    #[serde(default)]
    pub name: String,
    pub url: String,
}

/// Drop repeated entries, keeping the first occurrence of each
pub(crate) fn dedup_preserving_order<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
