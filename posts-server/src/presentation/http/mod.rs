use axum::Router;

use super::AppState;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) fn app_router(state: AppState) -> Router {
    routes::router().with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::Router;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::app_router;
    use super::middleware::limits::with_limits;
    use crate::application::post_gateway::PostGateway;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::presentation::AppState;

    fn app(repo: Arc<InMemoryPostRepository>) -> Router {
        let gateway = PostGateway::new(repo, Duration::from_millis(200));
        app_router(AppState::new(Arc::new(gateway)))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.expect("infallible router");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        (status, bytes.to_vec())
    }

    fn as_json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).expect("body must be json")
    }

    #[tokio::test]
    async fn root_answers_ok() {
        let (status, body) = send(app(Arc::new(InMemoryPostRepository::new())), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty_array() {
        let (status, body) =
            send(app(Arc::new(InMemoryPostRepository::new())), get("/posts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!([]));
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let repo = Arc::new(InMemoryPostRepository::new());

        let (status, body) = send(
            app(repo.clone()),
            post_json(r#"{"title": "Hello, world!", "text": "body", "viewCounter": 3}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created = as_json(&body);
        assert_eq!(created["title"], "Hello, world!");
        assert_eq!(created["text"], "body");
        assert_eq!(created["viewCounter"], 3);
        assert!(created.get("published").is_none());
        assert!(created["id"].as_i64().is_some());
        assert!(created["createdAt"].is_string());
        assert!(created["updatedAt"].is_string());

        let (status, body) = send(app(repo), get("/posts")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = as_json(&body);
        let listed = listed.as_array().expect("array of posts");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
        assert_eq!(listed[0]["title"], "Hello, world!");
    }

    #[tokio::test]
    async fn invalid_post_is_400_with_violations() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let (status, body) = send(
            app(repo.clone()),
            post_json(r#"{"title": "", "text": 5, "published": "sometimes"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = as_json(&body);
        assert_eq!(body["error"], "validation failed");
        let fields: Vec<&str> = body["violations"]
            .as_array()
            .expect("violations array")
            .iter()
            .filter_map(|violation| violation["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["title", "text", "published"]);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, body) = send(
            app(Arc::new(InMemoryPostRepository::new())),
            post_json("{not json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["error"].is_string());
    }

    #[tokio::test]
    async fn store_outage_is_503() {
        let repo = Arc::new(InMemoryPostRepository::new());
        repo.set_unavailable(true);

        let (status, _) = send(app(repo.clone()), get("/posts")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = send(app(repo.clone()), post_json(r#"{"title": "t", "text": "b"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = send(app(repo), get("/healthz")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(as_json(&body), json!({"status": "unavailable"}));
    }

    #[tokio::test]
    async fn healthz_reports_reachable_store() {
        let (status, body) =
            send(app(Arc::new(InMemoryPostRepository::new())), get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_by_limits() {
        let router = with_limits(
            app(Arc::new(InMemoryPostRepository::new())),
            16,
            8,
            Duration::from_secs(5),
        );
        let body = json!({"title": "t", "text": "x".repeat(64)}).to_string();
        let request = Request::builder()
            .method("POST")
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .expect("valid request");

        let (status, _) = send(router, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
