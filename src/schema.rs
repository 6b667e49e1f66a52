//! Workflow schema: style-driven column layout
//!
//! A project's kanban style selects an ordered set of column specs. Each
//! spec accepts one or more aliased status labels so that projects
//! switching styles never orphan existing task data; the first label is
//! the primary status a drag into the column resolves to.

use crate::types::{labels, ColumnId, KanbanStyle, Project, Status};

/// Descriptor for one workflow column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub title: String,
    /// Aliased status labels; the first one is the primary status
    pub statuses: Vec<Status>,
    /// Sprint-scoped specs expand into one column per visible sprint
    pub sprint_scoped: bool,
}

impl ColumnSpec {
    fn new(id: &str, title: &str, statuses: &[&str]) -> Self {
        Self {
            id: ColumnId::from_string(id),
            title: title.to_string(),
            statuses: statuses.iter().map(|s| Status::from(*s)).collect(),
            sprint_scoped: false,
        }
    }

    fn sprint(id: &str, title: &str, statuses: &[&str]) -> Self {
        Self {
            sprint_scoped: true,
            ..Self::new(id, title, statuses)
        }
    }

    /// The status a drag into this column resolves to
    pub fn primary_status(&self) -> &Status {
        &self.statuses[0]
    }

    /// Check if the column accepts a task with the given status
    pub fn accepts(&self, status: &Status) -> bool {
        self.statuses.contains(status)
    }
}

/// The ordered column layout for one project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSchema {
    columns: Vec<ColumnSpec>,
    terminal: Vec<Status>,
}

impl WorkflowSchema {
    /// Build the schema for a style and archive flag.
    /// Total: every style value yields a layout.
    pub fn new(style: KanbanStyle, has_archived: bool) -> Self {
        let mut columns = match style {
            KanbanStyle::Default => vec![
                ColumnSpec::new("backlog", "Backlog", &[labels::BACKLOG]),
                ColumnSpec::sprint("sprint", "Sprint Planning", &[labels::SPRINT_PLANNING]),
                ColumnSpec::new("doing", "In Progress", &[labels::IN_PROGRESS]),
                ColumnSpec::new("review", "In Review", &[labels::IN_REVIEW]),
                ColumnSpec::new("done", "Done", &[labels::DONE]),
            ],
            KanbanStyle::Minimal => vec![
                ColumnSpec::new("todo", "To Do", &[labels::BACKLOG, labels::SPRINT_PLANNING]),
                ColumnSpec::new(
                    "doing",
                    "In Progress",
                    &[labels::IN_PROGRESS, labels::IN_REVIEW],
                ),
                ColumnSpec::new("done", "Done", &[labels::DONE]),
            ],
            KanbanStyle::None => vec![
                ColumnSpec::new(
                    "open",
                    "Open",
                    &[
                        labels::BACKLOG,
                        labels::SPRINT_PLANNING,
                        labels::IN_PROGRESS,
                        labels::IN_REVIEW,
                    ],
                ),
                ColumnSpec::new("done", "Done", &[labels::DONE]),
            ],
        };

        if has_archived {
            columns.push(ColumnSpec::new("archived", "Archived", &[labels::ARCHIVED]));
        }

        Self {
            columns,
            terminal: vec![Status::from(labels::DONE), Status::from(labels::ARCHIVED)],
        }
    }

    /// Build the schema for a project's configuration
    pub fn for_project(project: &Project) -> Self {
        Self::new(project.kanban_style, project.has_archived)
    }

    /// The ordered column specs
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Find a column spec by ID
    pub fn find_column(&self, id: &ColumnId) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Check if a status belongs to this schema's label set
    pub fn contains(&self, status: &Status) -> bool {
        self.columns.iter().any(|c| c.accepts(status))
    }

    /// Check if a status counts as terminal success for progress ratios
    /// and reopen eligibility
    pub fn is_terminal(&self, status: &Status) -> bool {
        self.terminal.contains(status)
    }

    /// The terminal-success status set
    pub fn terminal_statuses(&self) -> &[Status] {
        &self.terminal
    }
}
