use anyhow::Context;

use fieldcheck_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fieldcheck_observability::init();

    let config = ApiConfig::from_env()?;
    let app = fieldcheck_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        body_limit = config.body_limit,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
