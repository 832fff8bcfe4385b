use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{create_post, list_posts};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_posts).post(create_post))
}
