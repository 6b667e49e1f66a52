//! Project configuration consumed by the workflow schema

use super::ids::ProjectId;
use serde::{Deserialize, Serialize};

/// Per-project workflow style selecting the column layout.
/// Unrecognized styles deserialize to `Default` so the schema stays total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum KanbanStyle {
    #[default]
    Default,
    Minimal,
    None,
}

impl KanbanStyle {
    /// Parse a style name, degrading to `Default` for unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "minimal" => Self::Minimal,
            "none" => Self::None,
            _ => Self::Default,
        }
    }
}

impl From<String> for KanbanStyle {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Project-level configuration relevant to the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub kanban_style: KanbanStyle,
    #[serde(default)]
    pub has_archived: bool,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub available_labels: Vec<String>,
}

impl Project {
    /// Create a new project with default workflow configuration
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self {
            id: id.into(),
            kanban_style: KanbanStyle::default(),
            has_archived: false,
            team: Vec::new(),
            available_labels: Vec::new(),
        }
    }

    /// Select the workflow style
    pub fn with_style(mut self, style: KanbanStyle) -> Self {
        self.kanban_style = style;
        self
    }

    /// Enable the archived column
    pub fn with_archived(mut self, has_archived: bool) -> Self {
        self.has_archived = has_archived;
        self
    }
}
