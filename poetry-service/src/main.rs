use poetry_service::config::PoetryConfig;
use poetry_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PoetryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    // Startup failures, including an unreadable poetry book, end the process
    // with a non-zero exit before any connection is accepted.
    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start poetry service: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!("Access backend at http://localhost:{}", app.port());

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
