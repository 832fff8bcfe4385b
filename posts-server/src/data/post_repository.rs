use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, ValidatedPost};

/// Storage seam for the `posts` collection.
///
/// Implementations classify their failures into `DomainError::StoreUnavailable`
/// and `DomainError::WriteConflict`; they never validate documents themselves.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn insert_post(&self, input: ValidatedPost) -> Result<Post, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
