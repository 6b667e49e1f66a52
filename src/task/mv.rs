//! MoveTask command - the drag state machine
//!
//! A drag gesture arrives as pure data: task, source column, target
//! column. The command validates the transition, applies it
//! optimistically to the board projection, issues the remote call, and
//! commits or rolls back when the response arrives.

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{labels, ColumnId, ColumnScope, SprintId, Status, TaskId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::execute::Execute;

/// Move a task between board columns
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Column the card was dragged from
    pub from: ColumnId,
    /// Column the card was dropped on
    pub to: ColumnId,
}

impl MoveTask {
    /// Create a new MoveTask command
    pub fn new(id: impl Into<TaskId>, from: impl Into<ColumnId>, to: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The status and sprint a drop target resolves to
fn resolve_target(
    scope: &ColumnScope,
    primary: &Status,
    current_sprint: Option<&SprintId>,
) -> (Status, Option<SprintId>) {
    match scope {
        // Sprint columns share one status; the column binds the sprint
        // (none for the synthetic Default column)
        ColumnScope::Sprint(bound) => (Status::from(labels::SPRINT_PLANNING), bound.clone()),
        ColumnScope::Status => {
            let status = primary.clone();
            // Only sprint-planning tasks stay sprint-scheduled
            let sprint = if status.is_sprint_planning() {
                current_sprint.cloned()
            } else {
                None
            };
            (status, sprint)
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let task = ctx.read_task(&self.id).await?;

        // External guard: edit at the source system, no call, no mutation
        if task.is_external() {
            return Err(BoardError::ExternalTask {
                id: self.id.to_string(),
            });
        }

        let board = ctx.board().await;
        let target = board
            .find_column(&self.to)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.to.to_string(),
            })?;
        board
            .find_column(&self.from)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.from.to_string(),
            })?;

        let (status, sprint) =
            resolve_target(&target.scope, target.primary_status(), task.sprint.as_ref());

        // No-op guard: same underlying status and sprint, ignore silently
        if status == task.status && sprint == task.sprint {
            return Ok(serde_json::to_value(&task)?);
        }

        // Schema guard
        if !ctx.schema().contains(&status) {
            return Err(BoardError::UnknownStatus {
                status: status.to_string(),
            });
        }

        // Optimistic apply: projection only, the working list is untouched
        ctx.apply_board(|b| {
            b.relocate(&self.id, &self.from, &self.to, &status, sprint.clone(), ctx.schema())
        })
        .await;

        let epoch = ctx.begin_move(&self.id);
        tracing::debug!(task = %self.id, from = %self.from, to = %self.to, %status, "moving task");

        let response = ctx
            .service()
            .update_task_status(&ctx.project().id, &self.id, &status, sprint.as_ref())
            .await;

        // A later move of the same task superseded this one; its rebuild
        // already owns the projection, so this response must not touch
        // anything
        if !ctx.is_current_move(&self.id, epoch) {
            tracing::debug!(task = %self.id, "discarding superseded move response");
            return Ok(json!({ "discarded": true }));
        }

        match response {
            Ok(server) => {
                // Commit: the server response is authoritative
                let merged = ctx.merge_task(server).await?;
                Ok(serde_json::to_value(&merged)?)
            }
            Err(err) => {
                // Rollback: the working list was never touched, so
                // recomputing the projection restores the pre-move board
                ctx.rebuild().await;
                tracing::warn!(task = %self.id, error = %err, "move failed, rolled back");
                Err(err.into())
            }
        }
    }
}
