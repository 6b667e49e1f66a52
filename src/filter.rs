//! Composable task filters
//!
//! Filters are named pure predicates, AND-combined by [`FilterSet`].
//! Each predicate depends only on the task and the filter context (epic
//! membership), never on another filter's result. An empty set is the
//! identity.

use crate::types::{Epic, EpicId, ProjectId, Task};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashSet;

/// Read-only context filters evaluate against
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterContext<'a> {
    pub epics: &'a [Epic],
}

impl<'a> FilterContext<'a> {
    /// Create a context over the known epics
    pub fn new(epics: &'a [Epic]) -> Self {
        Self { epics }
    }
}

/// Cutoff for the updated-at filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatedCutoff {
    /// Every task passes
    All,
    /// Pass iff the task was updated after the cutoff
    Since(DateTime<Utc>),
}

/// Task field targeted by generic equality filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Assignee,
    Reviewer,
    Label,
    Priority,
}

/// A named pure predicate over tasks
#[derive(Debug, Clone)]
pub enum Filter {
    /// Pass closed tasks only when `show_closed` is set
    Closed { show_closed: bool },
    /// Recency cutoff on `updated_at`
    Updated { cutoff: UpdatedCutoff },
    /// Selected epic's task set; `None` selects nothing and passes all
    Epic { epic: Option<EpicId> },
    /// Reject tasks whose project is in the excluded set
    ExcludedProjects { projects: HashSet<ProjectId> },
    /// Equality on a named task field
    Field { field: TaskField, value: String },
    /// Case-insensitive fuzzy match over title, labels and assignees
    Search { query: String },
}

impl Filter {
    /// Stable identifier naming the predicate
    pub fn id(&self) -> &'static str {
        match self {
            Self::Closed { .. } => "closed",
            Self::Updated { .. } => "updatedAt",
            Self::Epic { .. } => "epic",
            Self::ExcludedProjects { .. } => "excluded",
            Self::Field { .. } => "field",
            Self::Search { .. } => "search",
        }
    }

    /// Evaluate the predicate against one task
    pub fn matches(&self, task: &Task, ctx: &FilterContext<'_>) -> bool {
        match self {
            Self::Closed { show_closed } => *show_closed || !task.closed,
            Self::Updated { cutoff } => match cutoff {
                UpdatedCutoff::All => true,
                UpdatedCutoff::Since(at) => task.updated_at > *at,
            },
            Self::Epic { epic } => match epic {
                None => true,
                Some(id) => ctx
                    .epics
                    .iter()
                    .find(|e| &e.id == id)
                    .is_some_and(|e| e.contains(&task.id)),
            },
            Self::ExcludedProjects { projects } => !projects.contains(&task.project),
            Self::Field { field, value } => match field {
                TaskField::Assignee => task.assignees.iter().any(|a| a == value),
                TaskField::Reviewer => task.reviewers.iter().any(|r| r == value),
                TaskField::Label => task.labels.iter().any(|l| l == value),
                TaskField::Priority => task.priority.as_str() == value,
            },
            Self::Search { query } => {
                if query.is_empty() {
                    return true;
                }
                let haystack = search_text(task);
                SkimMatcherV2::default()
                    .ignore_case()
                    .fuzzy_match(&haystack, query)
                    .is_some()
            }
        }
    }
}

/// Everything the free-text search looks at
fn search_text(task: &Task) -> String {
    let mut text = task.title.clone();
    for label in &task.labels {
        text.push(' ');
        text.push_str(label);
    }
    for assignee in &task.assignees {
        text.push(' ');
        text.push_str(assignee);
    }
    text
}

/// An ordered set of filters, AND-combined
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Create an empty filter set (the identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter in place
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Check if no filters are active
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The active filters, in order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Evaluate all filters against one task
    pub fn matches(&self, task: &Task, ctx: &FilterContext<'_>) -> bool {
        self.filters.iter().all(|f| f.matches(task, ctx))
    }

    /// Select the tasks passing every filter, preserving input order
    pub fn apply<'t>(&self, tasks: &'t [Task], ctx: &FilterContext<'_>) -> Vec<&'t Task> {
        tasks.iter().filter(|t| self.matches(t, ctx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Epic;
    use chrono::TimeZone;

    fn task(id: &str) -> Task {
        Task::new(id, format!("Task {id}"), "Backlog", "p1")
    }

    #[test]
    fn test_empty_set_is_identity() {
        let tasks = vec![task("t1"), task("t2"), task("t3")];
        let ctx = FilterContext::default();
        let kept = FilterSet::new().apply(&tasks, &ctx);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_closed_filter() {
        let mut closed = task("t1");
        closed.closed = true;
        let ctx = FilterContext::default();

        let hide = Filter::Closed { show_closed: false };
        assert!(!hide.matches(&closed, &ctx));
        assert!(hide.matches(&task("t2"), &ctx));

        let show = Filter::Closed { show_closed: true };
        assert!(show.matches(&closed, &ctx));
    }

    #[test]
    fn test_updated_cutoff() {
        let cutoff = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let ctx = FilterContext::default();

        let stale = task("t1").with_updated_at(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        let fresh = task("t2").with_updated_at(Utc.with_ymd_and_hms(2026, 8, 10, 0, 0, 0).unwrap());

        let since = Filter::Updated {
            cutoff: UpdatedCutoff::Since(cutoff),
        };
        assert!(!since.matches(&stale, &ctx));
        assert!(since.matches(&fresh, &ctx));

        let all = Filter::Updated {
            cutoff: UpdatedCutoff::All,
        };
        assert!(all.matches(&stale, &ctx));
    }

    #[test]
    fn test_epic_filter() {
        let epics = vec![Epic::new("e1", "Payments").with_tasks(vec!["t1".into()])];
        let ctx = FilterContext::new(&epics);

        let none = Filter::Epic { epic: None };
        assert!(none.matches(&task("t2"), &ctx));

        let selected = Filter::Epic {
            epic: Some("e1".into()),
        };
        assert!(selected.matches(&task("t1"), &ctx));
        assert!(!selected.matches(&task("t2"), &ctx));

        // Selecting an unknown epic selects the empty set
        let missing = Filter::Epic {
            epic: Some("e9".into()),
        };
        assert!(!missing.matches(&task("t1"), &ctx));
    }

    #[test]
    fn test_excluded_projects() {
        let ctx = FilterContext::default();
        let filter = Filter::ExcludedProjects {
            projects: ["p1".into()].into_iter().collect(),
        };
        assert!(!filter.matches(&task("t1"), &ctx));

        let other = Task::new("t2", "Elsewhere", "Backlog", "p2");
        assert!(filter.matches(&other, &ctx));
    }

    #[test]
    fn test_field_equality() {
        let ctx = FilterContext::default();
        let t = task("t1").with_assignees(vec!["alice".into()]);

        let hit = Filter::Field {
            field: TaskField::Assignee,
            value: "alice".into(),
        };
        let miss = Filter::Field {
            field: TaskField::Assignee,
            value: "bob".into(),
        };
        assert!(hit.matches(&t, &ctx));
        assert!(!miss.matches(&t, &ctx));
    }

    #[test]
    fn test_fuzzy_search() {
        let ctx = FilterContext::default();
        let t = Task::new("t1", "Fix login timeout", "Backlog", "p1")
            .with_labels(vec!["bug".into()])
            .with_assignees(vec!["Alice Smith".into()]);

        assert!(Filter::Search { query: "login".into() }.matches(&t, &ctx));
        // Case-insensitive, matches across labels and assignee names
        assert!(Filter::Search { query: "BUG".into() }.matches(&t, &ctx));
        assert!(Filter::Search { query: "alice".into() }.matches(&t, &ctx));
        assert!(!Filter::Search { query: "billing".into() }.matches(&t, &ctx));
        // Empty query always passes
        assert!(Filter::Search { query: String::new() }.matches(&t, &ctx));
    }

    #[test]
    fn test_filter_ids_are_stable() {
        assert_eq!(Filter::Closed { show_closed: true }.id(), "closed");
        assert_eq!(Filter::Search { query: "x".into() }.id(), "search");
        assert_eq!(Filter::Epic { epic: None }.id(), "epic");
    }

    #[test]
    fn test_filters_and_combine() {
        let mut closed = task("t1");
        closed.closed = true;
        let open = task("t2");
        let tasks = vec![closed, open];
        let ctx = FilterContext::default();

        let set = FilterSet::new()
            .with(Filter::Closed { show_closed: false })
            .with(Filter::Search { query: "Task".into() });

        let kept = set.apply(&tasks, &ctx);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_str(), "t2");
    }
}
