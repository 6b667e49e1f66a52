//! Sprint and epic types

use super::ids::{EpicId, SprintId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bounded time window a task can be scheduled into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: SprintId,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Template this sprint was repeated from, for recurring series
    #[serde(default)]
    pub origin: Option<SprintId>,
}

impl Sprint {
    /// Create a new sprint covering the given window
    pub fn new(
        id: impl Into<SprintId>,
        title: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            end_date,
            origin: None,
        }
    }

    /// Mark this sprint as repeated from a template
    pub fn with_origin(mut self, origin: impl Into<SprintId>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Whether `now` falls inside the sprint window
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// A grouping of tasks carrying inter-task blocking relationships,
/// independent of workflow status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: EpicId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<TaskId>,
    /// Per task, the tasks blocking it within this epic
    #[serde(default)]
    pub tasks_blocked_by: HashMap<TaskId, Vec<TaskId>>,
}

impl Epic {
    /// Create a new epic
    pub fn new(id: impl Into<EpicId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
            tasks_blocked_by: HashMap::new(),
        }
    }

    /// Set the member task set
    pub fn with_tasks(mut self, tasks: Vec<TaskId>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Check if a task belongs to this epic
    pub fn contains(&self, task: &TaskId) -> bool {
        self.tasks.contains(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sprint_activity_window() {
        let sprint = Sprint::new(
            "s1",
            "Sprint 1",
            Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 14, 23, 59, 59).unwrap(),
        );

        let during = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 8, 20, 0, 0, 0).unwrap();
        assert!(sprint.is_active(during));
        assert!(!sprint.is_active(after));
    }

    #[test]
    fn test_epic_membership() {
        let epic = Epic::new("e1", "Payments").with_tasks(vec!["t1".into(), "t2".into()]);
        assert!(epic.contains(&"t1".into()));
        assert!(!epic.contains(&"t9".into()));
    }
}
