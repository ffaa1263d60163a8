use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematic_detail_api::{
    config::Config,
    routes::create_router,
    services::{detail::DetailService, providers::tmdb::TmdbProvider, recommender::Recommender},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Both datasets are loaded exactly once; a size mismatch or unreadable
    // file aborts startup before the listener binds.
    let recommender = Arc::new(Recommender::from_files(
        &config.movie_index_path,
        &config.similarity_matrix_path,
    )?);

    let provider = Arc::new(TmdbProvider::new(
        config.api_key.clone(),
        config.tmdb_api_url.clone(),
    ));

    let detail_service = Arc::new(DetailService::new(
        provider,
        recommender,
        config.image_base_url.clone(),
    ));

    let state = AppState::new(detail_service, config.recommendation_limit);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
