use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{DomainError, ValidationError, Violation, ViolationKind};

pub(crate) const TITLE_MAX_CHARS: usize = 100;
pub(crate) const TEXT_MAX_CHARS: usize = 2000;

const FIELD_DOCUMENT: &str = "document";
const FIELD_TITLE: &str = "title";
const FIELD_TEXT: &str = "text";
const FIELD_VIEW_COUNTER: &str = "viewCounter";
const FIELD_PUBLISHED: &str = "published";
const FIELD_CREATED_AT: &str = "createdAt";
const FIELD_UPDATED_AT: &str = "updatedAt";

// ASCII word characters, space and `, . ! ?`; length is checked separately.
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_ ,.!?]+$").expect("title pattern must compile"));

/// Identifier assigned by the store when a post is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct PostId(i64);

impl PostId {
    pub(crate) fn new(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::Unexpected(format!(
                "store returned non-positive post id {raw}"
            )));
        }
        Ok(Self(raw))
    }

    pub(crate) fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted post document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) view_counter: Option<i64>,
    pub(crate) published: Option<bool>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// A candidate document that passed every schema rule, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedPost {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) view_counter: Option<i64>,
    pub(crate) published: Option<bool>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Checks an untyped candidate against the post schema.
///
/// Only recognized fields are looked at; anything else in the object is
/// ignored. `null` counts as absent. Every failing rule is reported, not just
/// the first one.
pub(crate) fn validate(candidate: &Value) -> Result<ValidatedPost, ValidationError> {
    validate_at(candidate, Utc::now())
}

/// Same as [`validate`] with an explicit clock for the timestamp defaults.
pub(crate) fn validate_at(
    candidate: &Value,
    now: DateTime<Utc>,
) -> Result<ValidatedPost, ValidationError> {
    let Some(fields) = candidate.as_object() else {
        return Err(ValidationError::single(
            FIELD_DOCUMENT,
            ViolationKind::TypeMismatch {
                expected: "a JSON object",
            },
        ));
    };

    let mut violations = Vec::new();

    let title = normalize_title(field(fields, FIELD_TITLE), &mut violations);
    let text = normalize_text(field(fields, FIELD_TEXT), &mut violations);
    let view_counter = coerce_optional(
        fields,
        FIELD_VIEW_COUNTER,
        "an integer",
        coerce_integer,
        &mut violations,
    );
    let published = coerce_optional(
        fields,
        FIELD_PUBLISHED,
        "a boolean",
        coerce_bool,
        &mut violations,
    );
    let created_at = coerce_optional(
        fields,
        FIELD_CREATED_AT,
        "an RFC 3339 timestamp or epoch milliseconds",
        coerce_timestamp,
        &mut violations,
    );
    let updated_at = coerce_optional(
        fields,
        FIELD_UPDATED_AT,
        "an RFC 3339 timestamp or epoch milliseconds",
        coerce_timestamp,
        &mut violations,
    );

    if let Some(err) = ValidationError::new(violations) {
        return Err(err);
    }

    match (title, text, view_counter, published, created_at, updated_at) {
        (Some(title), Some(text), Ok(view_counter), Ok(published), Ok(created_at), Ok(updated_at)) => {
            Ok(ValidatedPost {
                title,
                text,
                view_counter,
                published,
                created_at: created_at.unwrap_or(now),
                updated_at: updated_at.unwrap_or(now),
            })
        }
        // each `None`/`Err` above has already recorded a violation
        _ => Err(ValidationError::single(
            FIELD_DOCUMENT,
            ViolationKind::MissingField,
        )),
    }
}

fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|value| !value.is_null())
}

fn normalize_title(value: Option<&Value>, violations: &mut Vec<Violation>) -> Option<String> {
    let raw = required_string(FIELD_TITLE, value, violations)?;
    let title = raw.trim();
    if title.is_empty() {
        violations.push(Violation {
            field: FIELD_TITLE,
            kind: ViolationKind::MissingField,
        });
        return None;
    }

    let before = violations.len();
    if title.chars().count() > TITLE_MAX_CHARS {
        violations.push(Violation {
            field: FIELD_TITLE,
            kind: ViolationKind::TooLong {
                max: TITLE_MAX_CHARS,
            },
        });
    }
    if !TITLE_PATTERN.is_match(title) {
        violations.push(Violation {
            field: FIELD_TITLE,
            kind: ViolationKind::PatternMismatch,
        });
    }

    (violations.len() == before).then(|| title.to_string())
}

fn normalize_text(value: Option<&Value>, violations: &mut Vec<Violation>) -> Option<String> {
    let text = required_string(FIELD_TEXT, value, violations)?;
    if text.is_empty() {
        violations.push(Violation {
            field: FIELD_TEXT,
            kind: ViolationKind::MissingField,
        });
        return None;
    }
    if text.chars().count() > TEXT_MAX_CHARS {
        violations.push(Violation {
            field: FIELD_TEXT,
            kind: ViolationKind::TooLong {
                max: TEXT_MAX_CHARS,
            },
        });
        return None;
    }
    Some(text.to_string())
}

fn required_string<'a>(
    field: &'static str,
    value: Option<&'a Value>,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    match value {
        None => {
            violations.push(Violation {
                field,
                kind: ViolationKind::MissingField,
            });
            None
        }
        Some(Value::String(raw)) => Some(raw.as_str()),
        Some(_) => {
            violations.push(Violation {
                field,
                kind: ViolationKind::TypeMismatch {
                    expected: "a string",
                },
            });
            None
        }
    }
}

/// `Ok(None)` when the field is absent, `Err(())` when it is present but
/// cannot be coerced (a violation has been recorded).
fn coerce_optional<T>(
    fields: &Map<String, Value>,
    name: &'static str,
    expected: &'static str,
    coerce: fn(&Value) -> Option<T>,
    violations: &mut Vec<Violation>,
) -> Result<Option<T>, ()> {
    let Some(value) = field(fields, name) else {
        return Ok(None);
    };
    match coerce(value) {
        Some(coerced) => Ok(Some(coerced)),
        None => {
            violations.push(Violation {
                field: name,
                kind: ViolationKind::TypeMismatch { expected },
            });
            Err(())
        }
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .filter(|float| *float >= i64::MIN as f64 && *float < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(raw) => match raw.trim() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
