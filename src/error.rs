//! Error types for the board synchronization engine

use crate::service::ServiceError;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found in the working list
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found on the current board
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Move attempted on an external task
    #[error("task {id} is managed by an external system; edit it at the source")]
    ExternalTask { id: String },

    /// Resolved status is not part of the project's workflow schema
    #[error("status '{status}' is not part of the workflow")]
    UnknownStatus { status: String },

    /// Server rejected a close because the task is blocked by an open task
    #[error("task {id} cannot be closed while the task blocking it is still open")]
    TaskBlocked { id: String },

    /// Reopen requested for a task that is not closed in a terminal status
    #[error("task {id} cannot be reopened from its current state")]
    ReopenNotAvailable { id: String },

    /// Network/server failure on a mutating call
    #[error("request failed: {message}")]
    Transport { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Check if this failure was caught locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. }
                | Self::ColumnNotFound { .. }
                | Self::ExternalTask { .. }
                | Self::UnknownStatus { .. }
                | Self::ReopenNotAvailable { .. }
        )
    }

    /// Check if this is the server-side blocked-close conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TaskBlocked { .. })
    }
}

impl From<ServiceError> for BoardError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Blocked { id } => Self::TaskBlocked { id: id.to_string() },
            ServiceError::Transport { message } => Self::Transport { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::TaskNotFound { id: "abc123".into() };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_blocked_message_is_specific() {
        let err = BoardError::TaskBlocked { id: "t1".into() };
        assert!(err.to_string().contains("blocking"));
        assert!(err.is_conflict());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        assert!(BoardError::ExternalTask { id: "x".into() }.is_validation());
        assert!(BoardError::UnknownStatus { status: "Nope".into() }.is_validation());
        assert!(!BoardError::transport("boom").is_validation());
    }
}
