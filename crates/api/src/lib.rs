//! # Daycare API
//!
//! The API crate provides the web server for the childcare center backend. It exposes
//! JSON endpoints for the service catalogue, children, schedule slots, subscriptions,
//! session generation, attendance and billing.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and call into the repositories
//! - **Generation**: Orchestrates session generation over a [`GenerationStore`]
//! - **Middleware**: Maps domain errors to HTTP responses
//! - **Config**: Reads server settings from the environment
//!
//! The API uses Axum as the web framework and SQLx over SQLite for storage.

/// Configuration module for API settings
pub mod config;
/// Session generation orchestration
pub mod generation;
/// Request handlers
pub mod handlers;
/// Error mapping middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use daycare_core::scheduling::generator::SessionGenerator;
use daycare_db::{
    store::{GenerationStore, SqliteStore},
    DbPool,
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> eyre::Result<()> {
/// use daycare_api::ApiState;
/// use daycare_core::scheduling::generator::SessionGenerator;
///
/// let db_pool = daycare_db::create_pool("sqlite://daycare.db").await?;
/// let state = ApiState::new(db_pool, SessionGenerator::default(), 3);
/// # Ok(())
/// # }
/// ```
pub struct ApiState {
    /// SQLite connection pool for repository calls
    pub db_pool: DbPool,
    /// Persistence used by session generation
    pub store: Arc<dyn GenerationStore>,
    pub generator: SessionGenerator,
    /// Months generated when a request does not say otherwise
    pub generation_months: u32,
}

impl ApiState {
    pub fn new(db_pool: DbPool, generator: SessionGenerator, generation_months: u32) -> Self {
        let store = Arc::new(SqliteStore::new(db_pool.clone()));
        Self {
            db_pool,
            store,
            generator,
            generation_months,
        }
    }
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::services::routes())
        .merge(routes::children::routes())
        .merge(routes::slots::routes())
        .merge(routes::subscriptions::routes())
        .merge(routes::attendance::routes())
        .merge(routes::billing::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(allowed)
}

/// Starts the API server with the provided configuration and database pool
///
/// Initializes logging, builds the router, applies the CORS, trace and timeout
/// layers, and serves until the process stops.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> eyre::Result<()> {
/// let config = daycare_api::config::ApiConfig::from_env()?;
/// let db_pool = daycare_db::create_pool(&config.database_url).await?;
/// daycare_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let generator = SessionGenerator::new(config.session_defaults);
    let state = Arc::new(ApiState::new(db_pool, generator, config.generation_months));

    let app = build_router(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
