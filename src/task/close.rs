//! CloseTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::execute::Execute;
use crate::types::TaskId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Close a task.
///
/// The close is guarded server-side: a task blocked by an open task is
/// rejected with a distinguishable conflict. Placement is never touched
/// optimistically, so a failure changes nothing locally.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseTask {
    /// The task ID to close
    pub id: TaskId,
}

impl CloseTask {
    /// Create a new CloseTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CloseTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let task = ctx.read_task(&self.id).await?;
        if task.is_external() {
            return Err(BoardError::ExternalTask {
                id: self.id.to_string(),
            });
        }

        let server = ctx
            .service()
            .close_task(&ctx.project().id, &self.id)
            .await?;
        let merged = ctx.merge_task(server).await?;

        tracing::debug!(task = %self.id, "task closed");
        Ok(serde_json::to_value(&merged)?)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::test_support::MockTaskService;
    use crate::types::{labels, Project, Task};
    use std::sync::Arc;

    async fn setup(tasks: Vec<Task>) -> (Arc<MockTaskService>, BoardContext) {
        let service = Arc::new(MockTaskService::with_tasks(tasks.clone()));
        let ctx = BoardContext::new(Project::new("p1"), service.clone());
        ctx.replace_tasks(tasks).await;
        (service, ctx)
    }

    #[tokio::test]
    async fn test_close_task() {
        let (_service, ctx) =
            setup(vec![Task::new("t1", "Task", labels::DONE, "p1")]).await;

        let result = CloseTask::new("t1").execute(&ctx).await.unwrap();
        assert_eq!(result["closed"], true);
        assert!(ctx.read_task(&"t1".into()).await.unwrap().closed);
    }

    #[tokio::test]
    async fn test_close_blocked_task_is_a_conflict() {
        let blocker = Task::new("t0", "Blocker", labels::IN_PROGRESS, "p1");
        let blocked =
            Task::new("t1", "Blocked", labels::DONE, "p1").with_blocked_by("t0");
        let (_service, ctx) = setup(vec![blocker, blocked]).await;

        let result = CloseTask::new("t1").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::TaskBlocked { .. })));
        assert!(result.unwrap_err().is_conflict());

        // Task remains open
        assert!(!ctx.read_task(&"t1".into()).await.unwrap().closed);
    }

    #[tokio::test]
    async fn test_close_succeeds_when_blocker_is_closed() {
        let mut blocker = Task::new("t0", "Blocker", labels::DONE, "p1");
        blocker.closed = true;
        let blocked =
            Task::new("t1", "Blocked", labels::DONE, "p1").with_blocked_by("t0");
        let (_service, ctx) = setup(vec![blocker, blocked]).await;

        CloseTask::new("t1").execute(&ctx).await.unwrap();
        assert!(ctx.read_task(&"t1".into()).await.unwrap().closed);
    }

    #[tokio::test]
    async fn test_close_transport_failure_changes_nothing() {
        let (service, ctx) =
            setup(vec![Task::new("t1", "Task", labels::DONE, "p1")]).await;
        let before = ctx.board().await;

        service.fail_next(crate::service::ServiceError::transport("boom"));
        let result = CloseTask::new("t1").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::Transport { .. })));
        assert_eq!(ctx.board().await, before);
    }
}
