use std::sync::Arc;

use crate::application::post_gateway::PostGateway;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) posts: Arc<PostGateway>,
}

impl AppState {
    pub(crate) fn new(posts: Arc<PostGateway>) -> Self {
        Self { posts }
    }
}
