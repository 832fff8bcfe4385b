//! HTTP client library for `posts-server`.
//!
//! [`PostsClient`] lists and creates posts and checks store readiness.
//! Validation failures reported by the server are decoded into
//! [`PostsClientError::Validation`] with one [`FieldViolation`] per failed rule.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::{FieldViolation, NewPost, Post};
