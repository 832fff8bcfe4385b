use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{self, Post};

/// The only way into the `posts` collection.
///
/// Every write is validated against the post schema first, and every store
/// round-trip is bounded by `store_timeout`.
pub(crate) struct PostGateway {
    repo: Arc<dyn PostRepository>,
    store_timeout: Duration,
}

impl PostGateway {
    pub(crate) fn new(repo: Arc<dyn PostRepository>, store_timeout: Duration) -> Self {
        Self {
            repo,
            store_timeout,
        }
    }

    pub(crate) async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.bounded("list", self.repo.list_posts()).await?;
        debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    pub(crate) async fn create(&self, input: &Value) -> Result<Post, DomainError> {
        let validated = post::validate(input).inspect_err(|err| {
            debug!(violations = err.violations().len(), "post rejected: {err}");
        })?;

        let created = self
            .bounded("create", self.repo.insert_post(validated))
            .await?;
        info!(post_id = %created.id, "post created");
        Ok(created)
    }

    pub(crate) async fn ping(&self) -> Result<(), DomainError> {
        self.bounded("ping", self.repo.ping()).await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        let result = match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::StoreUnavailable(format!(
                "{operation} timed out after {}ms",
                self.store_timeout.as_millis()
            ))),
        };

        if let Err(err) = &result {
            warn!(operation, error = %err, "post store call failed");
        }
        result
    }
}
