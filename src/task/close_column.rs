//! CloseColumn command - best-effort bulk close

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::execute::Execute;
use crate::types::Status;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Close every eligible (non-closed, non-blocked) task in a terminal
/// column in one request.
///
/// Best-effort: tasks the server could not close (still blocked) are
/// simply not in the response; whatever subset comes back is merged.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseColumn {
    /// The status whose tasks should be closed
    pub status: Status,
}

impl CloseColumn {
    /// Create a new CloseColumn command
    pub fn new(status: impl Into<Status>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CloseColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let closed = ctx
            .service()
            .close_tasks(&ctx.project().id, &self.status)
            .await?;
        let count = ctx.merge_tasks(closed).await?;

        tracing::debug!(status = %self.status, count, "bulk close");
        Ok(json!({ "closed": count }))
    }
}
