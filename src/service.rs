//! The persistence port
//!
//! The remote API this engine calls, one request per action. Responses
//! are authoritative; the engine merges them into its working list and
//! never persists anything itself.

use crate::types::{ProjectId, SprintId, Status, Task, TaskId};
use async_trait::async_trait;
use thiserror::Error;

/// Failures a service call can report
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Close rejected: the task is blocked by a task that is not closed
    #[error("task {id} is blocked by an open task")]
    Blocked { id: TaskId },

    /// Network or server failure
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl ServiceError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Remote task persistence API
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Move a task to a new status, optionally (re)scheduling it into a
    /// sprint. `sprint` is only meaningful for sprint-planning statuses.
    async fn update_task_status(
        &self,
        project: &ProjectId,
        task: &TaskId,
        status: &Status,
        sprint: Option<&SprintId>,
    ) -> Result<Task, ServiceError>;

    /// Close a task. Rejected with [`ServiceError::Blocked`] when the
    /// task's blocker is still open.
    async fn close_task(&self, project: &ProjectId, task: &TaskId) -> Result<Task, ServiceError>;

    /// Best-effort batch close of every eligible task in a status.
    /// Returns the subset the server actually closed.
    async fn close_tasks(
        &self,
        project: &ProjectId,
        status: &Status,
    ) -> Result<Vec<Task>, ServiceError>;

    /// Reopen a closed task
    async fn reopen_task(&self, project: &ProjectId, task: &TaskId) -> Result<Task, ServiceError>;

    /// Persist the pinned flag
    async fn update_task_pin(
        &self,
        project: &ProjectId,
        task: &TaskId,
        pinned: bool,
    ) -> Result<Task, ServiceError>;

    /// Persist the viewer's subscription flag. The one mutation allowed
    /// on external tasks.
    async fn update_task_subscription(
        &self,
        project: &ProjectId,
        task: &TaskId,
        subscribed: bool,
    ) -> Result<Task, ServiceError>;
}
