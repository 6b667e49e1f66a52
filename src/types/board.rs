//! The derived board view-model: Board, BoardColumn, Card
//!
//! The board is a disposable projection of the authoritative task list.
//! It is never the source of truth and is always safe to discard and
//! recompute.

use super::ids::{ColumnId, ProjectId, SprintId, TaskId};
use super::status::Status;
use super::task::{Points, Priority, Task};
use crate::aggregate::{progress_ratio, ColumnAggregates};
use crate::schema::WorkflowSchema;
use crate::sort::insertion_index;
use crate::task::{CloseTask, MoveTask, ReopenTask};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a column selects on besides status labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "sprint")]
pub enum ColumnScope {
    /// Plain status column
    Status,
    /// Sprint-scoped column; `None` is the synthetic "Default" sprint
    /// holding unscheduled sprint-planning tasks
    Sprint(Option<SprintId>),
}

/// One card on the board, carrying the task fields the rendering layer
/// needs plus prepared action handles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    pub sprint: Option<SprintId>,
    pub points: Points,
    /// Completion percentage, 100 for terminal statuses
    pub progress: u32,
    pub pinned: bool,
    pub closed: bool,
    pub blocked: bool,
    pub external: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub viewer_is_subscribed: bool,
    /// Reopen is only offered for closed tasks in a terminal status
    pub can_reopen: bool,
    pub updated_at: DateTime<Utc>,
    pub project: ProjectId,
}

impl Card {
    /// Project a task into a card under the given schema
    pub fn from_task(task: &Task, schema: &WorkflowSchema) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status.clone(),
            sprint: task.sprint.clone(),
            points: task.points,
            progress: progress_ratio(&task.points, &task.status, schema),
            pinned: task.pinned,
            closed: task.closed,
            blocked: task.blocked,
            external: task.is_external(),
            priority: task.priority,
            due_date: task.due_date,
            assignees: task.assignees.clone(),
            labels: task.labels.clone(),
            viewer_is_subscribed: task.viewer_is_subscribed,
            can_reopen: task.closed && schema.is_terminal(&task.status),
            updated_at: task.updated_at,
            project: task.project.clone(),
        }
    }

    /// Handle for dragging this card between columns
    pub fn move_handle(&self, from: impl Into<ColumnId>, to: impl Into<ColumnId>) -> MoveTask {
        MoveTask::new(self.id.clone(), from, to)
    }

    /// Handle for closing this card
    pub fn close_handle(&self) -> CloseTask {
        CloseTask::new(self.id.clone())
    }

    /// Handle for reopening this card
    pub fn reopen_handle(&self) -> ReopenTask {
        ReopenTask::new(self.id.clone())
    }
}

/// A rendering bucket bound to one or more status labels, optionally
/// bound to a specific sprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: ColumnId,
    pub title: String,
    /// Aliased status labels this column accepts; the first is primary
    pub statuses: Vec<Status>,
    pub scope: ColumnScope,
    pub aggregates: ColumnAggregates,
    pub cards: Vec<Card>,
}

impl BoardColumn {
    /// The status a drag into this column resolves to
    pub fn primary_status(&self) -> &Status {
        &self.statuses[0]
    }

    /// Recompute the column's aggregates from its cards
    pub fn refresh_aggregates(&mut self) {
        self.aggregates = ColumnAggregates::from_points(self.cards.iter().map(|c| &c.points));
    }
}

/// The transient, filtered, sorted view-model of columns and cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

impl Board {
    /// Find a column by ID
    pub fn find_column(&self, id: &ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Find a column by ID (mutable)
    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut BoardColumn> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// Find a card anywhere on the board, with its column ID and index
    pub fn find_card(&self, id: &TaskId) -> Option<(&ColumnId, usize, &Card)> {
        for column in &self.columns {
            if let Some(index) = column.cards.iter().position(|c| &c.id == id) {
                return Some((&column.id, index, &column.cards[index]));
            }
        }
        None
    }

    /// Optimistically relocate a card between columns, giving it the new
    /// status and sprint binding. The card keeps its sort position rules:
    /// it is inserted where the sort policy would place it. Returns false
    /// (and changes nothing) when the card is not in the source column.
    ///
    /// This touches only the projection; the authoritative task list is
    /// updated separately once the server confirms.
    pub fn relocate(
        &mut self,
        task: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        status: &Status,
        sprint: Option<SprintId>,
        schema: &WorkflowSchema,
    ) -> bool {
        if self.find_column(to).is_none() {
            return false;
        }
        let Some(source) = self.find_column_mut(from) else {
            return false;
        };
        let Some(index) = source.cards.iter().position(|c| &c.id == task) else {
            return false;
        };
        let mut card = source.cards.remove(index);
        source.refresh_aggregates();

        card.status = status.clone();
        card.sprint = sprint;
        card.progress = progress_ratio(&card.points, &card.status, schema);
        card.can_reopen = card.closed && schema.is_terminal(&card.status);

        let Some(target) = self.find_column_mut(to) else {
            return false;
        };
        let at = insertion_index(
            target.cards.iter().map(|c| (c.pinned, c.updated_at)),
            card.pinned,
            card.updated_at,
        );
        target.cards.insert(at, card);
        target.refresh_aggregates();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KanbanStyle;

    fn schema() -> WorkflowSchema {
        WorkflowSchema::new(KanbanStyle::Default, false)
    }

    fn column(id: &str, status: &str, cards: Vec<Card>) -> BoardColumn {
        let mut column = BoardColumn {
            id: id.into(),
            title: id.to_string(),
            statuses: vec![status.into()],
            scope: ColumnScope::Status,
            aggregates: ColumnAggregates::default(),
            cards,
        };
        column.refresh_aggregates();
        column
    }

    fn card(id: &str, status: &str) -> Card {
        Card::from_task(&Task::new(id, id, status, "p1"), &schema())
    }

    #[test]
    fn test_find_card() {
        let board = Board {
            columns: vec![
                column("backlog", "Backlog", vec![card("t1", "Backlog")]),
                column("doing", "In Progress", vec![card("t2", "In Progress")]),
            ],
        };

        let (column_id, index, found) = board.find_card(&"t2".into()).unwrap();
        assert_eq!(column_id.as_str(), "doing");
        assert_eq!(index, 0);
        assert_eq!(found.id.as_str(), "t2");
        assert!(board.find_card(&"t9".into()).is_none());
    }

    #[test]
    fn test_relocate_moves_card_and_updates_aggregates() {
        let mut board = Board {
            columns: vec![
                column("backlog", "Backlog", vec![card("t1", "Backlog")]),
                column("doing", "In Progress", vec![]),
            ],
        };

        let moved = board.relocate(
            &"t1".into(),
            &"backlog".into(),
            &"doing".into(),
            &"In Progress".into(),
            None,
            &schema(),
        );
        assert!(moved);

        let backlog = board.find_column(&"backlog".into()).unwrap();
        assert!(backlog.cards.is_empty());
        assert_eq!(backlog.aggregates.total_points, 0);

        let doing = board.find_column(&"doing".into()).unwrap();
        assert_eq!(doing.cards.len(), 1);
        assert_eq!(doing.cards[0].status.as_str(), "In Progress");
        assert_eq!(doing.aggregates.total_points, 1);
    }

    #[test]
    fn test_relocate_missing_card_is_a_no_op() {
        let mut board = Board {
            columns: vec![
                column("backlog", "Backlog", vec![card("t1", "Backlog")]),
                column("doing", "In Progress", vec![]),
            ],
        };
        let before = board.clone();

        let moved = board.relocate(
            &"t9".into(),
            &"backlog".into(),
            &"doing".into(),
            &"In Progress".into(),
            None,
            &schema(),
        );
        assert!(!moved);
        assert_eq!(board, before);
    }
}
