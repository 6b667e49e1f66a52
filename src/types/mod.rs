//! Core types for the board synchronization engine

mod board;
mod ids;
mod project;
mod sprint;
mod status;
mod task;

// Re-export all types
pub use board::{Board, BoardColumn, Card, ColumnScope};
pub use ids::{ColumnId, EpicId, ProjectId, SprintId, TaskId};
pub use project::{KanbanStyle, Project};
pub use sprint::{Epic, Sprint};
pub use status::{labels, Status};
pub use task::{ExternalLink, Points, Priority, Task};
