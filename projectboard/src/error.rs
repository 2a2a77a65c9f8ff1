//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Coarse classification used by callers deciding how to surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced id is absent from the board (programming or race error)
    NotFound,
    /// Rejected by a precondition or by the remote project service
    Validation,
    /// The remote call did not complete successfully
    Transport,
    /// Configuration could not be loaded
    Config,
}

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Checklist not found on a task
    #[error("checklist not found: {id}")]
    ChecklistNotFound { id: String },

    /// Check item not found on a checklist
    #[error("check item not found: {id}")]
    CheckItemNotFound { id: String },

    /// Generic resource not found (members, boards reported by the service)
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Column still holds tasks and cannot be deleted
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// A board snapshot violates the column/task ordering invariants
    #[error("inconsistent board: {message}")]
    InconsistentBoard { message: String },

    /// Rejected by the project service (e.g. empty required field)
    #[error("rejected by project service: {message}")]
    Validation { message: String },

    /// The project service call did not complete successfully
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl BoardError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an inconsistent board error
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentBoard {
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create a generic not found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound { .. }
            | Self::ColumnNotFound { .. }
            | Self::ChecklistNotFound { .. }
            | Self::CheckItemNotFound { .. }
            | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ColumnNotEmpty { .. }
            | Self::DuplicateId { .. }
            | Self::InconsistentBoard { .. }
            | Self::Validation { .. } => ErrorKind::Validation,
            Self::Transport { .. } | Self::Http(_) | Self::Json(_) => ErrorKind::Transport,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Whether the error warrants a user-visible notification.
    ///
    /// Not-found errors signal a stale board or a bug and are not shown.
    pub fn is_user_facing(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Validation)
    }

    /// The engine never retries; kept so callers can share handling code
    /// with other operation errors.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<figment::Error> for BoardError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
