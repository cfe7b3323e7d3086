use readme_generator::{logging, router, AppState, Config, ReadmeService};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(&config.log_level);

    if config.gemini_api_key().is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail with 503");
    }
    if config.github_token().is_none() {
        info!("GITHUB_TOKEN is not set; using the anonymous GitHub rate limit");
    }

    let state = AppState::new(ReadmeService::from_config(&config)?);
    let app = router(state);

    info!("README generator web server starting...");
    info!("Health check: http://{}/health", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
