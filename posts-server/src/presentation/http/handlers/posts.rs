use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::post::Post;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult, ErrorBody};

/// Documented request shape. The handler accepts any JSON and leaves the
/// checks to the post schema, so type mismatches are reported per field.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub(crate) struct CreatePostDto {
    /// 1..=100 chars of letters, digits, `_`, spaces and `, . ! ?`; trimmed.
    pub(crate) title: String,
    /// 1..=2000 chars.
    pub(crate) text: String,
    pub(crate) view_counter: Option<i64>,
    pub(crate) published: Option<bool>,
    /// Defaults to the time of creation.
    pub(crate) created_at: Option<DateTime<Utc>>,
    /// Defaults to the time of creation.
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) view_counter: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) published: Option<bool>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.get(),
            title: post.title,
            text: post.text,
            view_counter: post.view_counter,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in store order", body = Vec<PostDto>),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.posts.list().await?;

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Malformed JSON or validation error", body = ErrorBody),
        (status = 409, description = "Write conflict", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let created = state.posts.create(&body).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(created))))
}
