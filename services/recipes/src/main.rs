use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use larder_core::tracing::{LogFormat, init_tracing};
use larder_recipes::config::RecipesConfig;
use larder_recipes::router::build_router;
use larder_recipes::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let config = RecipesConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let addr = format!("0.0.0.0:{}", config.recipes_port);
    let router = build_router(AppState::new(db, config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("recipes service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
