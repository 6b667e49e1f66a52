//! Workflow status labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// The well-known status labels used by the built-in workflow styles.
///
/// Statuses are open-ended strings on the wire; these constants name the
/// labels the style tables are built from.
pub mod labels {
    pub const BACKLOG: &str = "Backlog";
    pub const SPRINT_PLANNING: &str = "Sprint Planning";
    pub const IN_PROGRESS: &str = "In Progress";
    pub const IN_REVIEW: &str = "In Review";
    pub const DONE: &str = "Done";
    pub const ARCHIVED: &str = "Archived";
}

/// A workflow status label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    /// Create a status from a label string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the shared sprint-planning label
    pub fn is_sprint_planning(&self) -> bool {
        self.0 == labels::SPRINT_PLANNING
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
