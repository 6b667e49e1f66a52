//! ReopenTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::execute::Execute;
use crate::types::TaskId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Reopen a closed task.
///
/// Only offered when the task is closed and its status is in the
/// style's terminal set; anything else is a local validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct ReopenTask {
    /// The task ID to reopen
    pub id: TaskId,
}

impl ReopenTask {
    /// Create a new ReopenTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ReopenTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let task = ctx.read_task(&self.id).await?;
        if task.is_external() {
            return Err(BoardError::ExternalTask {
                id: self.id.to_string(),
            });
        }
        if !task.closed || !ctx.schema().is_terminal(&task.status) {
            return Err(BoardError::ReopenNotAvailable {
                id: self.id.to_string(),
            });
        }

        let server = ctx
            .service()
            .reopen_task(&ctx.project().id, &self.id)
            .await?;
        let merged = ctx.merge_task(server).await?;

        tracing::debug!(task = %self.id, "task reopened");
        Ok(serde_json::to_value(&merged)?)
    }
}
