//! Strongly-typed tracker identifiers
//!
//! Newtypes keep issue keys, sprint ids, and board ids from being mixed up,
//! and validate shape at the boundary so malformed identifiers never travel
//! further into the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn require_non_empty(kind: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{kind} cannot be empty"))
    } else {
        Ok(())
    }
}

/// A tracker issue key, `{PROJECT}-{number}`
///
/// ```
/// use sprintdeck::domain::IssueKey;
///
/// let key: IssueKey = "PROJ-123".parse().unwrap();
/// assert_eq!(key.as_str(), "PROJ-123");
/// assert!("PROJ-abc".parse::<IssueKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueKey(String);

impl IssueKey {
    /// Validates and wraps an issue key
    ///
    /// The project prefix may itself contain dashes; the final segment must
    /// be numeric.
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        require_non_empty("Issue key", &key)?;

        let valid = key
            .rsplit_once('-')
            .is_some_and(|(prefix, number)| {
                !prefix.is_empty()
                    && !number.is_empty()
                    && number.chars().all(|c| c.is_ascii_digit())
            });
        if !valid {
            return Err(format!(
                "Invalid issue key format. Expected {{PROJECT}}-{{number}}, got: {key}"
            ));
        }
        Ok(Self(key))
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A tracker-assigned sprint id
///
/// Numeric in Jira-style trackers, but held as an opaque non-empty string to
/// stay vendor-neutral.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintId(String);

impl SprintId {
    /// Validates and wraps a sprint id
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        require_non_empty("Sprint ID", &id)?;
        Ok(Self(id))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A tracker board id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(String);

impl BoardId {
    /// Validates and wraps a board id
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        require_non_empty("Board ID", &id)?;
        Ok(Self(id))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($($ty:ident),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    )*};
}

string_id_impls!(IssueKey, SprintId, BoardId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_shapes() {
        assert!(IssueKey::new("PROJ-123").is_ok());
        // Dashed project prefixes are real
        assert!(IssueKey::new("MY-TEAM-42").is_ok());

        for bad in ["", "   ", "PROJ", "PROJ-", "-123", "PROJ-abc"] {
            assert!(IssueKey::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_issue_key_round_trip() {
        let key: IssueKey = "OPS-7".parse().unwrap();
        assert_eq!(key.as_str(), "OPS-7");
        assert_eq!(key.to_string(), "OPS-7");
        assert_eq!(key.into_inner(), "OPS-7");
    }

    #[test]
    fn test_sprint_and_board_ids_reject_blank() {
        assert_eq!(SprintId::new("314").unwrap().as_str(), "314");
        assert_eq!(BoardId::new("42").unwrap().as_str(), "42");
        assert!(SprintId::new("").is_err());
        assert!(BoardId::new(" ").is_err());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let key = IssueKey::new("PROJ-9").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"PROJ-9\"");
        let back: IssueKey = serde_json::from_str("\"PROJ-9\"").unwrap();
        assert_eq!(back, key);
    }
}
