//! Board assembly
//!
//! A pure function from the authoritative data plus view settings to a
//! disposable [`Board`]. Recomputed whenever the task list, a filter
//! value, or the active sprint changes.

use crate::aggregate::ColumnAggregates;
use crate::filter::{FilterContext, FilterSet};
use crate::schema::{ColumnSpec, WorkflowSchema};
use crate::sort::sort_column;
use crate::types::{Board, BoardColumn, Card, ColumnId, ColumnScope, Epic, Sprint, SprintId, Task};
use chrono::{DateTime, Utc};

/// Ambient view state passed explicitly instead of read from globals
#[derive(Debug, Clone)]
pub struct SprintContext {
    /// The sprint the user is currently working in, if any. Always gets
    /// a column, even when its window has passed.
    pub active: Option<SprintId>,
    /// Reference instant for deciding which sprint windows are visible
    pub now: DateTime<Utc>,
}

impl Default for SprintContext {
    fn default() -> Self {
        Self {
            active: None,
            now: Utc::now(),
        }
    }
}

impl SprintContext {
    /// Context with an active sprint selected
    pub fn active(sprint: impl Into<SprintId>) -> Self {
        Self {
            active: Some(sprint.into()),
            ..Self::default()
        }
    }

    /// Pin the reference instant (deterministic tests)
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Derive the board from the authoritative data.
///
/// For each column spec: select tasks whose status matches one of the
/// column's aliased labels; sprint-scoped specs expand into one column
/// per sprint (ordered by start date) plus a trailing synthetic
/// "Default" column selecting sprint-planning tasks with no sprint.
/// The filter pipeline, sort policy and aggregates are then applied
/// per column.
pub fn build_board(
    tasks: &[Task],
    filters: &FilterSet,
    schema: &WorkflowSchema,
    sprints: &[Sprint],
    epics: &[Epic],
    sprint_context: &SprintContext,
) -> Board {
    let filter_ctx = FilterContext::new(epics);
    let mut columns = Vec::new();

    for spec in schema.columns() {
        if spec.sprint_scoped {
            let mut ordered = visible_sprints(sprints, sprint_context.now);
            // The active sprint keeps its column even after its window
            if let Some(active) = &sprint_context.active {
                if !ordered.iter().any(|s| &s.id == active) {
                    if let Some(sprint) = sprints.iter().find(|s| &s.id == active) {
                        ordered.push(sprint.clone());
                    }
                }
            }
            ordered.sort_by_key(|s| s.start_date);

            for sprint in &ordered {
                columns.push(build_column(
                    spec,
                    sprint_column_id(&spec.id, Some(&sprint.id)),
                    sprint.title.clone(),
                    ColumnScope::Sprint(Some(sprint.id.clone())),
                    tasks,
                    filters,
                    schema,
                    &filter_ctx,
                ));
            }
            columns.push(build_column(
                spec,
                sprint_column_id(&spec.id, None),
                "Default".to_string(),
                ColumnScope::Sprint(None),
                tasks,
                filters,
                schema,
                &filter_ctx,
            ));
        } else {
            columns.push(build_column(
                spec,
                spec.id.clone(),
                spec.title.clone(),
                ColumnScope::Status,
                tasks,
                filters,
                schema,
                &filter_ctx,
            ));
        }
    }

    Board { columns }
}

/// Column ID for a sprint-scoped expansion of a spec
pub fn sprint_column_id(spec: &ColumnId, sprint: Option<&SprintId>) -> ColumnId {
    match sprint {
        Some(id) => ColumnId::from_string(format!("{}:{}", spec, id)),
        None => ColumnId::from_string(format!("{}:default", spec)),
    }
}

/// Restrict a sprint list to the ones worth a column: currently active
/// or starting in the future.
pub fn visible_sprints(sprints: &[Sprint], now: DateTime<Utc>) -> Vec<Sprint> {
    sprints
        .iter()
        .filter(|s| s.is_active(now) || s.start_date > now)
        .cloned()
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn build_column(
    spec: &ColumnSpec,
    id: ColumnId,
    title: String,
    scope: ColumnScope,
    tasks: &[Task],
    filters: &FilterSet,
    schema: &WorkflowSchema,
    filter_ctx: &FilterContext<'_>,
) -> BoardColumn {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| spec.accepts(&t.status))
        .filter(|t| match &scope {
            ColumnScope::Status => true,
            ColumnScope::Sprint(bound) => &t.sprint == bound,
        })
        .filter(|t| filters.matches(t, filter_ctx))
        .collect();

    sort_column(&mut selected);

    let aggregates = ColumnAggregates::from_points(selected.iter().map(|t| &t.points));
    let cards = selected
        .iter()
        .map(|t| Card::from_task(t, schema))
        .collect();

    BoardColumn {
        id,
        title,
        statuses: spec.statuses.clone(),
        scope,
        aggregates,
        cards,
    }
}
