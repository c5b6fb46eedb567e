//! Driftpub - A minimal, single-host ActivityPub federation node
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - Discovery endpoints (.well-known)                        │
//! │  - ActivityPub endpoints (actors, inbox, collections)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Federation Layer                           │
//! │  - Actor identity derivation                                │
//! │  - Activity classification and dispatch                     │
//! │  - Outbound delivery (Accept handshake)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response is computed from the request plus static
//! configuration; the node keeps no persistent protocol state. The
//! only shared sink is the debug request log.
//!
//! # Modules
//!
//! - `api`: HTTP handlers for discovery and ActivityPub
//! - `federation`: protocol core (actors, activities, delivery)
//! - `request_log`: NDJSON debug log of inbound inbox traffic
//! - `config`: Configuration management
//! - `error`: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod federation;
pub mod request_log;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// This struct is cloned for each request and contains shared
/// resources like configuration, the HTTP client, and the debug log.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// HTTP client for outbound federation delivery
    pub http_client: Arc<reqwest::Client>,

    /// Debug request log
    pub request_log: Arc<request_log::RequestLog>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Build the outbound HTTP client with the delivery timeout
    /// 2. Open the debug request log
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Driftpub/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(
                config.federation.delivery_timeout_seconds,
            ))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        let request_log = request_log::RequestLog::new(config.request_log.clone());

        Ok(Self {
            config: Arc::new(config),
            http_client: Arc::new(http_client),
            request_log: Arc::new(request_log),
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(api::wellknown_router())
        .merge(api::activitypub_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
