//! Board synchronization engine
//!
//! This crate derives a kanban board view-model from an authoritative
//! in-memory task list and coordinates optimistic status moves against a
//! remote persistence service. The remote service owns every task; the
//! engine never persists anything itself.
//!
//! ## Overview
//!
//! - **Schema-driven columns** - a project's workflow style selects the
//!   ordered column layout; styles alias historical status labels so
//!   style switches orphan no data
//! - **Composable filters** - named pure predicates, AND-combined,
//!   recomputed on every task/filter/sprint change
//! - **Optimistic moves** - a drag mutates the disposable board
//!   projection immediately; the authoritative list changes only once
//!   the server confirms, so rollback is a recompute
//! - **Conflict-aware closes** - blocked tasks surface a distinguishable
//!   server conflict; bulk close is best-effort
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use boardsync::{BoardContext, Execute, task::MoveTask, types::Project};
//! use std::sync::Arc;
//!
//! # async fn example(service: Arc<dyn boardsync::TaskService>) -> Result<(), boardsync::BoardError> {
//! let ctx = BoardContext::new(Project::new("p1"), service);
//! ctx.replace_tasks(vec![/* fetched from the service */]).await;
//!
//! // A drag gesture is pure data: task, source column, target column
//! MoveTask::new("task-1", "backlog", "doing").execute(&ctx).await?;
//!
//! let board = ctx.board().await;
//! println!("{} columns", board.columns.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## State model
//!
//! ```text
//! tasks/sprints/epics + filters + sprint context
//!         │
//!         ▼  build_board (schema → filter → sort → aggregate)
//!      Board ──────────── disposable projection, safe to discard
//!         ▲
//!         │  optimistic relocate / rebuild
//!    MoveTask ──────────▶ TaskService (remote, authoritative)
//! ```

pub mod aggregate;
pub mod builder;
mod context;
mod error;
mod execute;
pub mod filter;
pub mod schema;
pub mod sort;
pub mod types;

// Command modules
pub mod task;

// Remote persistence port
mod service;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use builder::{build_board, SprintContext};
pub use context::BoardContext;
pub use error::{BoardError, Result};
pub use execute::Execute;
pub use filter::{Filter, FilterSet};
pub use schema::WorkflowSchema;
pub use service::{ServiceError, TaskService};

// Re-export commonly used types
pub use types::{
    Board, BoardColumn, Card, ColumnId, ColumnScope, Epic, EpicId, KanbanStyle, Points, Priority,
    Project, ProjectId, Sprint, SprintId, Status, Task, TaskId,
};
