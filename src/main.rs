use anyhow::Context;
use redraft::{build_app, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config).context("failed to build http client")?);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("redraft listening on http://{}", addr);
    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}
