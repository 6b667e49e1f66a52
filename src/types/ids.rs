//! Newtype IDs for the board domain
//!
//! Every ID originates at the remote persistence service; the engine
//! treats them as opaque strings with stable identity.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifies a task
    TaskId
);
string_id!(
    /// Identifies a project
    ProjectId
);
string_id!(
    /// Identifies a sprint
    SprintId
);
string_id!(
    /// Identifies an epic
    EpicId
);
string_id!(
    /// Identifies a board column in the derived view-model
    ColumnId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = TaskId::from_string("t-42");
        assert_eq!(id.as_str(), "t-42");
        assert_eq!(id.to_string(), "t-42");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t-42\"");
        let parsed: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_from_str() {
        let a: SprintId = "s1".into();
        let b = SprintId::from_string(String::from("s1"));
        assert_eq!(a, b);
    }
}
