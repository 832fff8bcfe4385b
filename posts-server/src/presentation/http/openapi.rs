use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::posts::{CreatePostDto, PostDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::liveness,
        crate::presentation::http::handlers::health::readiness,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::create_post
    ),
    components(schemas(CreatePostDto, PostDto, ErrorBody, HealthzResponse)),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "posts", description = "Post collection endpoints")
    )
)]
pub(crate) struct ApiDoc;
