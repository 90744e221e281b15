//! Rekayasa Content Gateway
//!
//! HTTP entry point for the content site.
//! Handles:
//! - Listing endpoints (filter, search, sort, paginate)
//! - Detail reads and site config lookups
//! - Outbound click-through redirects
//! - Rate limiting and backpressure
//! - Observability (logging, metrics, health)

mod handlers;
mod middleware;
#[cfg(test)]
mod tests;

use axum::{middleware as axum_middleware, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use rekayasa_common::{
    config::AppConfig,
    db::{self, ContentRepository},
    metrics,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use middleware::rate_limit::{self, GlobalRateLimiter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repo: ContentRepository,
    pub metrics: Option<PrometheusHandle>,
    pub limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(config: AppConfig, repo: ContentRepository, metrics: Option<PrometheusHandle>) -> Self {
        let limiter = config.rate_limit.enabled.then(|| {
            rate_limit::create_rate_limiter(
                config.rate_limit.requests_per_second,
                config.rate_limit.burst,
            )
        });

        Self {
            config: Arc::new(config),
            repo,
            metrics,
            limiter,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    init_tracing(&config);

    info!(
        service = %config.observability.service_name,
        environment = %config.content.environment,
        "Starting Rekayasa gateway v{}",
        rekayasa_common::VERSION
    );

    // Initialize metrics
    let metrics_handle = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .set_buckets(metrics::LATENCY_BUCKETS)?
            .install_recorder()?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    // Connect the content store; absent credentials leave it unconfigured
    let store = db::connect_store(&config.store).await?;
    let include_drafts = config.content.include_drafts();
    info!(include_drafts, "Draft visibility resolved");

    let repo = ContentRepository::new(store, include_drafts);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, repo, metrics_handle);

    // Build the router
    let app = create_router(state);

    // Start the server
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .pretty()
            .init();
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let timeout = TimeoutLayer::new(state.config.request_timeout());
    let concurrency = ConcurrencyLimitLayer::new(state.config.server.max_concurrent_requests);

    // API routes
    let api_routes = Router::new()
        // Papers
        .route("/papers", get(handlers::papers::list_papers))
        .route("/papers/summaries", get(handlers::papers::list_paper_summaries))
        .route("/papers/{id}", get(handlers::papers::get_paper))
        // Konsep, e-books, modules
        .route("/konsep", get(handlers::konsep::list_konsep))
        .route("/ebooks", get(handlers::ebooks::list_ebooks))
        .route("/modules", get(handlers::modules::list_modules))
        // News
        .route("/news", get(handlers::news::news_feed))
        .route("/news/featured", get(handlers::news::featured_news))
        .route("/news/{id}", get(handlers::news::get_news_article))
        // Site config
        .route("/config/{key}", get(handlers::site_config::get_site_config));

    // Compose the app
    Router::new()
        .nest("/api", api_routes)
        .route("/go/{kind}/{id}", get(handlers::outbound::redirect))
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics))
        .route_layer(axum_middleware::from_fn(middleware::metrics::track_requests))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(timeout)
        .layer(concurrency)
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
