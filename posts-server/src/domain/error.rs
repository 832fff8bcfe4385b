use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("write conflict: {0}")]
    WriteConflict(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub(crate) enum ViolationKind {
    MissingField,
    PatternMismatch,
    TooLong { max: usize },
    TypeMismatch { expected: &'static str },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::MissingField => f.write_str("is required"),
            ViolationKind::PatternMismatch => {
                f.write_str("may only contain letters, digits, '_', spaces and , . ! ?")
            }
            ViolationKind::TooLong { max } => write!(f, "must be at most {max} chars"),
            ViolationKind::TypeMismatch { expected } => write!(f, "must be {expected}"),
        }
    }
}

/// A single failed rule of the post schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Violation {
    pub(crate) field: &'static str,
    #[serde(flatten)]
    pub(crate) kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.field, self.kind)
    }
}

/// Every rule violation found in a candidate document, in field order.
///
/// Never empty: a candidate either validates completely or yields at least
/// one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            return None;
        }
        Some(Self { violations })
    }

    pub(crate) fn single(field: &'static str, kind: ViolationKind) -> Self {
        Self {
            violations: vec![Violation { field, kind }],
        }
    }

    pub(crate) fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub(crate) fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    #[cfg(test)]
    pub(crate) fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field && violation.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed: ")?;
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
