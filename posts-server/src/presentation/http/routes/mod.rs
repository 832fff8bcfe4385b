use axum::Router;
use axum::routing::get;

use super::handlers::health::{liveness, readiness};
use crate::presentation::AppState;

pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/healthz", get(readiness))
        .nest("/posts", posts::router())
}
