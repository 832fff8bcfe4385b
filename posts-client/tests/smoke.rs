use std::time::{SystemTime, UNIX_EPOCH};

use posts_client::{NewPost, PostsClient, PostsClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn client() -> PostsClient {
    let base_url =
        std::env::var("POSTS_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    PostsClient::new(base_url).expect("client must build")
}

#[tokio::test]
#[ignore = "requires running HTTP server and database"]
async fn http_smoke_flow() {
    let client = client();
    client.health().await.expect("server must be ready");

    let title = format!("Smoke post {}", unique_suffix());
    let created = client
        .create_post(&NewPost {
            published: Some(true),
            ..NewPost::new(title.as_str(), "smoke body")
        })
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, title);
    assert_eq!(created.published, Some(true));
    assert!(created.id > 0);

    let listed = client.list_posts().await.expect("list_posts must succeed");
    let found: Vec<_> = listed.iter().filter(|post| post.id == created.id).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, title);
    assert_eq!(found[0].text, "smoke body");
}

#[tokio::test]
#[ignore = "requires running HTTP server and database"]
async fn http_validation_flow() {
    let client = client();

    let err = client
        .create_post(&NewPost::new("A".repeat(101), ""))
        .await
        .expect_err("invalid post must be rejected");

    match err {
        PostsClientError::Validation(violations) => {
            assert!(
                violations
                    .iter()
                    .any(|v| v.field == "title" && v.reason == "too_long")
            );
            assert!(
                violations
                    .iter()
                    .any(|v| v.field == "text" && v.reason == "missing_field")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
