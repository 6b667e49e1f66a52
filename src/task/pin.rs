//! PinTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::execute::Execute;
use crate::types::TaskId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Set or clear a task's pinned flag.
///
/// The only persisted ordering input; everything else about card order
/// is recomputed.
#[derive(Debug, Clone, Deserialize)]
pub struct PinTask {
    /// The task ID to pin or unpin
    pub id: TaskId,
    /// The new pinned state
    pub pinned: bool,
}

impl PinTask {
    /// Create a new PinTask command
    pub fn new(id: impl Into<TaskId>, pinned: bool) -> Self {
        Self {
            id: id.into(),
            pinned,
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for PinTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let task = ctx.read_task(&self.id).await?;
        if task.is_external() {
            return Err(BoardError::ExternalTask {
                id: self.id.to_string(),
            });
        }

        let server = ctx
            .service()
            .update_task_pin(&ctx.project().id, &self.id, self.pinned)
            .await?;
        let merged = ctx.merge_task(server).await?;
        Ok(serde_json::to_value(&merged)?)
    }
}
