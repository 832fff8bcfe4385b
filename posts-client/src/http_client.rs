use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{FieldViolation, NewPost, Post};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    #[serde(default)]
    violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone)]
/// HTTP client for the `posts-server` REST API.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Creates a client for a server base URL such as `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: Response) -> PostsClientError {
        let status = response.status();

        match response.json::<ErrorResponseDto>().await {
            Ok(body) => PostsClientError::from_http_status(status, body.error, body.violations),
            Err(_) => PostsClientError::from_http_status(status, None, Vec::new()),
        }
    }

    async fn send<TRes, TReq>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> PostsClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(PostsClientError::from_reqwest)
    }

    /// Returns every post in the store's natural order.
    pub async fn list_posts(&self) -> PostsClientResult<Vec<Post>> {
        self.send::<Vec<Post>, ()>(Method::GET, "/posts", None)
            .await
    }

    /// Creates a post. Server-side validation failures come back as
    /// [`PostsClientError::Validation`].
    pub async fn create_post(&self, post: &NewPost) -> PostsClientResult<Post> {
        self.send(Method::POST, "/posts", Some(post)).await
    }

    /// Checks that the server is up and can reach its post store.
    pub async fn health(&self) -> PostsClientResult<()> {
        let response = self
            .client
            .get(self.endpoint("/healthz"))
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(())
    }
}
