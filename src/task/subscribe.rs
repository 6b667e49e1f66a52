//! SubscribeTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::execute::Execute;
use crate::types::TaskId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Toggle the viewer's subscription to a task.
///
/// The one mutation allowed on external tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeTask {
    /// The task ID to (un)subscribe from
    pub id: TaskId,
    /// The new subscription state
    pub subscribed: bool,
}

impl SubscribeTask {
    /// Create a new SubscribeTask command
    pub fn new(id: impl Into<TaskId>, subscribed: bool) -> Self {
        Self {
            id: id.into(),
            subscribed,
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for SubscribeTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        // No external guard: subscription is viewer-local state
        ctx.read_task(&self.id).await?;

        let server = ctx
            .service()
            .update_task_subscription(&ctx.project().id, &self.id, self.subscribed)
            .await?;
        let merged = ctx.merge_task(server).await?;
        Ok(serde_json::to_value(&merged)?)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::test_support::MockTaskService;
    use crate::types::{labels, Project, Task};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_subscribe_allowed_on_external_task() {
        let task = Task::new("t1", "Mirror", labels::BACKLOG, "p1")
            .with_external("github", "https://example.com/1");
        let service = Arc::new(MockTaskService::with_tasks(vec![task.clone()]));
        let ctx = BoardContext::new(Project::new("p1"), service);
        ctx.replace_tasks(vec![task]).await;

        let result = SubscribeTask::new("t1", true).execute(&ctx).await.unwrap();
        assert_eq!(result["viewerIsSubscribed"], true);
        assert!(ctx.read_task(&"t1".into()).await.unwrap().viewer_is_subscribed);
    }
}
