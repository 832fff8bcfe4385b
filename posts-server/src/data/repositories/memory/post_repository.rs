use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId, ValidatedPost};

/// Process-local post store used by tests.
///
/// Insertion order is the natural order. Outages and slow round-trips can be
/// simulated to exercise the gateway's failure paths.
#[derive(Default)]
pub(crate) struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    unavailable: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub(crate) fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().expect("delay mutex poisoned") = delay;
    }

    pub(crate) fn len(&self) -> usize {
        self.posts.lock().expect("posts mutex poisoned").len()
    }

    async fn round_trip(&self) -> Result<(), DomainError> {
        let delay = *self.delay.lock().expect("delay mutex poisoned");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_post(&self, input: ValidatedPost) -> Result<Post, DomainError> {
        self.round_trip().await?;

        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let next_id = i64::try_from(posts.len() + 1)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        let post = Post {
            id: PostId::new(next_id)?,
            title: input.title,
            text: input.text,
            view_counter: input.view_counter,
            published: input.published,
            created_at: input.created_at,
            updated_at: input.updated_at,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.round_trip().await?;
        Ok(self.posts.lock().expect("posts mutex poisoned").clone())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.round_trip().await
    }
}
