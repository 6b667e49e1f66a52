//! Task types: Task, Points, Priority, ExternalLink

use super::ids::{EpicId, ProjectId, SprintId, TaskId};
use super::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Story-point bookkeeping for a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Points {
    /// Estimated size; unsized tasks carry no total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    /// Points already done; may exceed `total` (overflow is a valid state)
    #[serde(default)]
    pub done: u32,
    /// Points currently in review
    #[serde(default)]
    pub review: u32,
}

impl Points {
    /// Create a sized points record
    pub fn sized(total: u32) -> Self {
        Self {
            total: Some(total),
            done: 0,
            review: 0,
        }
    }

    /// Set the done portion
    pub fn with_done(mut self, done: u32) -> Self {
        self.done = done;
        self
    }

    /// Set the review portion
    pub fn with_review(mut self, review: u32) -> Self {
        self.review = review;
        self
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Lowercase name as used in field filters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Provenance of a task mirrored from an external system.
/// External tasks are read-only here except for subscription toggling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    pub provider: String,
    pub url: String,
}

/// A work item rendered as a card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub sprint: Option<SprintId>,
    #[serde(default)]
    pub epics: Vec<EpicId>,
    #[serde(default)]
    pub blocked_by: Option<TaskId>,
    /// Always kept equal to `blocked_by.is_some()`; normalized on merge
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notification_day: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub reviewers: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub external: Option<ExternalLink>,
    #[serde(default)]
    pub viewer_is_subscribed: bool,
    pub updated_at: DateTime<Utc>,
    pub project: ProjectId,
}

impl Task {
    /// Create a new task with the given identity, status and project
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        status: impl Into<Status>,
        project: impl Into<ProjectId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: status.into(),
            points: Points::default(),
            sprint: None,
            epics: Vec::new(),
            blocked_by: None,
            blocked: false,
            closed: false,
            pinned: false,
            priority: Priority::default(),
            due_date: None,
            notification_day: None,
            assignees: Vec::new(),
            reviewers: Vec::new(),
            labels: Vec::new(),
            external: None,
            viewer_is_subscribed: false,
            updated_at: Utc::now(),
            project: project.into(),
        }
    }

    /// Set the points record
    pub fn with_points(mut self, points: Points) -> Self {
        self.points = points;
        self
    }

    /// Schedule into a sprint
    pub fn with_sprint(mut self, sprint: impl Into<SprintId>) -> Self {
        self.sprint = Some(sprint.into());
        self
    }

    /// Mark as blocked by another task
    pub fn with_blocked_by(mut self, blocker: impl Into<TaskId>) -> Self {
        self.blocked_by = Some(blocker.into());
        self.blocked = true;
        self
    }

    /// Set the pinned flag
    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Set assignees
    pub fn with_assignees(mut self, assignees: Vec<String>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Set labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Set the last-updated timestamp
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    /// Mark as mirrored from an external system
    pub fn with_external(mut self, provider: impl Into<String>, url: impl Into<String>) -> Self {
        self.external = Some(ExternalLink {
            provider: provider.into(),
            url: url.into(),
        });
        self
    }

    /// Check if this task is mirrored from an external system
    pub fn is_external(&self) -> bool {
        self.external.is_some()
    }

    /// Re-establish the `blocked == blocked_by.is_some()` invariant
    pub fn normalize(&mut self) {
        self.blocked = self.blocked_by.is_some();
    }

    /// Merge an authoritative server response into this task, field by
    /// field. The server may normalize fields beyond the ones the client
    /// changed, so every field is taken from the response.
    pub fn merge_from(&mut self, server: Task) {
        debug_assert_eq!(self.id, server.id);
        *self = server;
        self.normalize();
    }
}
