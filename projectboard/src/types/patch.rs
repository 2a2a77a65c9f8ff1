//! Partial updates for columns, tasks, checklists and check items
//!
//! A `None` field means "leave unchanged". Patches serialize to the `update`
//! object the project service expects.

use super::ids::MemberId;
use super::task::{dedup_preserving_order, CheckItem, CheckItemState, Checklist, Task};
use super::board::Column;
use serde::{Deserialize, Serialize};

/// Column fields that can be changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColumnPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub(crate) fn apply(&self, column: &mut Column) {
        if let Some(name) = &self.name {
            column.name = name.clone();
        }
    }
}

/// Task fields that can be changed by a shallow merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replace all labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Replace all assignees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees_ids: Option<Vec<MemberId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subscribed: Option<bool>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<MemberId>) -> Self {
        self.assignees_ids = Some(assignees);
        self
    }

    pub fn with_subscribed(mut self, subscribed: bool) -> Self {
        self.is_subscribed = Some(subscribed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.assignees_ids.is_none()
            && self.is_subscribed.is_none()
    }

    /// Patch carrying the mutable fields of a task as confirmed by the service
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: Some(task.name.clone()),
            description: Some(task.description.clone()),
            labels: Some(task.labels.clone()),
            assignees_ids: Some(task.assignees_ids.clone()),
            is_subscribed: Some(task.is_subscribed),
        }
    }

    /// Shallow merge; label and assignee lists are deduplicated
    pub(crate) fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(labels) = &self.labels {
            task.labels = dedup_preserving_order(labels.clone());
        }
        if let Some(assignees) = &self.assignees_ids {
            task.assignees_ids = dedup_preserving_order(assignees.clone());
        }
        if let Some(subscribed) = self.is_subscribed {
            task.is_subscribed = subscribed;
        }
    }
}

/// Checklist fields that can be changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChecklistPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub(crate) fn apply(&self, checklist: &mut Checklist) {
        if let Some(name) = &self.name {
            checklist.name = name.clone();
        }
    }
}

/// Check item fields that can be changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CheckItemState>,
}

impl CheckItemPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            state: None,
        }
    }

    pub fn state(state: CheckItemState) -> Self {
        Self {
            name: None,
            state: Some(state),
        }
    }

    /// Patch carrying a check item's fields as confirmed by the service
    pub fn from_item(item: &CheckItem) -> Self {
        Self {
            name: Some(item.name.clone()),
            state: Some(item.state),
        }
    }

    pub(crate) fn apply(&self, item: &mut CheckItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(state) = self.state {
            item.state = state;
        }
    }
}
