//! Application startup and lifecycle management.
//!
//! The poetry book is loaded before the listener is bound, so no request can
//! observe a half-initialised store. A load failure aborts startup.

use crate::config::PoetryConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{ChatGateway, ContentStore};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::cors::{cors_layer, origin_guard_middleware, OriginValidator};
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub gateway: Arc<ChatGateway>,
    pub origins: Arc<OriginValidator>,
    /// Prebuilt frontend served for non-API routes; `None` outside prod.
    pub frontend_dir: Option<PathBuf>,
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/health", get(handlers::health_check))
        // Add CORS layer
        .layer(cors_layer(state.origins.clone()))
        // Reject unknown origins before CORS and handlers see the request
        .layer(from_fn_with_state(
            state.origins.clone(),
            origin_guard_middleware,
        ));

    let mut router = api.with_state(state.clone());

    if let Some(dir) = &state.frontend_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Load the poetry book, wire the provider, and bind the listener.
    pub async fn build(config: PoetryConfig) -> Result<Self, AppError> {
        let content = ContentStore::load(&config.content.path)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    "CRITICAL: poetry book could not be loaded; refusing to start"
                );
                AppError::InternalError(anyhow::Error::new(e))
            })?;

        let provider = GeminiTextProvider::new(GeminiConfig {
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: config.gemini.timeout,
        })
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;
        let provider: Arc<dyn TextProvider> = Arc::new(provider);

        if config.gemini.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail until it is");
        }
        tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");

        let origins = OriginValidator::from_origins(&config.security.allowed_origins);
        tracing::info!(policy = ?origins.policy(), "Configured origin policy");

        let frontend_dir = config
            .serves_frontend()
            .then(|| config.frontend.build_dir.clone());
        if let Some(dir) = &frontend_dir {
            tracing::info!(dir = %dir.display(), "Serving prebuilt frontend");
        }

        let state = AppState {
            service_name: Arc::from(config.service_name.as_str()),
            gateway: Arc::new(ChatGateway::new(
                content,
                provider,
                config.gemini.api_key.clone(),
            )),
            origins: Arc::new(origins),
            frontend_dir,
        };

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Poetry service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
