use crate::config::Config;
use crate::streaming::{self, ScenarioCache};
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use hlsfixture_scenario::Scenario;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Compiled scenarios by scenario string (disabled when `None`)
    pub scenarios: Option<Arc<ScenarioCache>>,
}

impl AppContext {
    /// Build a context, creating the scenario cache when it is enabled.
    pub fn new(config: Config) -> Self {
        let scenarios = match config.scenario.cache_entries {
            0 => None,
            entries => Some(Arc::new(ScenarioCache::new(entries))),
        };

        Self {
            config: Arc::new(config),
            scenarios,
        }
    }

    /// Compiled scenario for a scenario string, cached when enabled.
    pub fn scenario(&self, scenario_path: &str) -> Arc<Scenario> {
        match &self.scenarios {
            Some(cache) => cache.get_or_compile(scenario_path),
            None => Arc::new(Scenario::compile(scenario_path)),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(streaming::fixture_router())
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static("hlsfixture"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!(
        media_dir = ?config.media.dir,
        stub = %config.media.stub_segment,
        delay_mode = ?config.scenario.delay_mode,
        "Fixture media"
    );

    let app = create_router(AppContext::new(config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
