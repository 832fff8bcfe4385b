use thiserror::Error;

use crate::models::FieldViolation;

#[derive(Debug, Error)]
/// Errors returned by `posts-client`.
pub enum PostsClientError {
    /// Transport-level failure (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the post; one entry per failed rule.
    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// The server could not reach its post store.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The store refused a conflicting write.
    #[error("write conflict: {0}")]
    Conflict(String),

    /// Any other non-success response, or a client-side misconfiguration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of `posts-client` operations.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl PostsClientError {
    pub(crate) fn from_http_status(
        status: reqwest::StatusCode,
        message: Option<String>,
        violations: Vec<FieldViolation>,
    ) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::BAD_REQUEST if !violations.is_empty() => {
                Self::Validation(violations)
            }
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable(message),
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None, Vec::new());
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::PostsClientError;
    use crate::models::FieldViolation;

    fn violation(field: &str, reason: &str) -> FieldViolation {
        FieldViolation {
            field: field.to_string(),
            reason: reason.to_string(),
            max: None,
            expected: None,
        }
    }

    #[test]
    fn bad_request_with_violations_is_validation() {
        let err = PostsClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("validation failed".to_string()),
            vec![violation("title", "missing_field")],
        );
        assert!(matches!(err, PostsClientError::Validation(ref v) if v.len() == 1));
        assert_eq!(err.to_string(), "validation failed: title: missing_field");
    }

    #[test]
    fn bad_request_without_violations_is_invalid_request() {
        let err = PostsClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("malformed json".to_string()),
            Vec::new(),
        );
        assert!(matches!(err, PostsClientError::InvalidRequest(ref m) if m == "malformed json"));
    }

    #[test]
    fn service_unavailable_and_conflict_are_distinguished() {
        assert!(matches!(
            PostsClientError::from_http_status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
                None,
                Vec::new()
            ),
            PostsClientError::Unavailable(_)
        ));
        assert!(matches!(
            PostsClientError::from_http_status(reqwest::StatusCode::CONFLICT, None, Vec::new()),
            PostsClientError::Conflict(_)
        ));
    }
}
