use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_gateway::PostGateway;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings).await?;
    run_migrations(&pool).await?;

    let repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let gateway = PostGateway::new(repo, settings.store_timeout());
    let state = AppState::new(Arc::new(gateway));

    let served = server::run_http(&settings, state).await;

    pool.close().await;
    info!("post store connections closed");
    served
}
