use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId, ValidatedPost};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    text: String,
    view_counter: Option<i64>,
    published: Option<bool>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_post(&self, input: ValidatedPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, text, view_counter, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, text, view_counter, published, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(input.view_counter)
        .bind(input.published)
        .bind(input.created_at)
        .bind(input.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                text,
                view_counter,
                published,
                created_at,
                updated_at
            FROM posts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;
        Ok(())
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Ok(Post {
        id: PostId::new(row.id)?,
        title: row.title,
        text: row.text,
        view_counter: row.view_counter,
        published: row.published,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => DomainError::StoreUnavailable(err.to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(code) => classify_sqlstate(code, err.to_string()),
            None => DomainError::Unexpected(err.to_string()),
        },
        _ => DomainError::Unexpected(err.to_string()),
    }
}

fn classify_sqlstate(code: &str, message: String) -> DomainError {
    match code {
        // unique_violation, serialization_failure, deadlock_detected
        "23505" | "40001" | "40P01" => DomainError::WriteConflict(message),
        // connection_exception class, admin/crash shutdown, cannot_connect_now
        code if code.starts_with("08") || code.starts_with("57P0") => {
            DomainError::StoreUnavailable(message)
        }
        _ => DomainError::Unexpected(message),
    }
}
