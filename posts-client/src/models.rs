use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A post as stored by the server.
pub struct Post {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed title.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Optional view counter.
    #[serde(default)]
    pub view_counter: Option<i64>,
    /// Optional publication flag.
    #[serde(default)]
    pub published: Option<bool>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a post. Unset optional fields are not sent.
pub struct NewPost {
    /// Title, 1..=100 chars of letters, digits, `_`, spaces and `, . ! ?`.
    pub title: String,
    /// Body text, 1..=2000 chars.
    pub text: String,
    /// Initial view counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_counter: Option<i64>,
    /// Initial publication flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl NewPost {
    /// Builds a payload with only the required fields set.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One rule a submitted post failed, as reported by the server.
pub struct FieldViolation {
    /// Field name in the request body (`title`, `text`, `viewCounter`, ...).
    pub field: String,
    /// Machine-readable reason: `missing_field`, `pattern_mismatch`,
    /// `too_long` or `type_mismatch`.
    pub reason: String,
    /// Length limit for `too_long`.
    #[serde(default)]
    pub max: Option<usize>,
    /// Expected type for `type_mismatch`.
    #[serde(default)]
    pub expected: Option<String>,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)?;
        if let Some(max) = self.max {
            write!(f, " (max {max})")?;
        }
        if let Some(expected) = &self.expected {
            write!(f, " (expected {expected})")?;
        }
        Ok(())
    }
}
