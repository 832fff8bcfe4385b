use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    #[schema(value_type = String)]
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Process is alive", body = String))
)]
pub(crate) async fn liveness() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Post store reachable", body = HealthzResponse),
        (status = 503, description = "Post store unreachable", body = HealthzResponse)
    )
)]
pub(crate) async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthzResponse>) {
    match state.posts.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthzResponse { status: "ok" })),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthzResponse {
                status: "unavailable",
            }),
        ),
    }
}
