//! Web layer module
//!
//! This module provides the HTTP interface for the VIN proxy. Handlers are
//! thin and delegate to the service layer for business logic.
//!
//! # Routes
//!
//! - `GET /lookup/{vin}`: cache-first decode
//! - `DELETE /remove/{vin}` (and `GET`): evict a cached VIN
//! - `GET /export`: parquet download of every cached vehicle
//! - `GET /health`: database connectivity
//! - `GET /`: 404 pointing at the endpoints above

use anyhow::Result;
use axum::{
    Router,
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{
    config::Config,
    database::{Database, repositories::VehicleSeaOrmRepository},
    decoder::VinDecoder,
    repositories::VehicleStore,
    services::{EvictionService, ExportService, LookupService},
};

pub mod handlers;
pub mod middleware;
pub mod responses;

pub use responses::{ErrorDetail, EvictionResponse, HealthResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    pub lookup_service: LookupService,
    pub eviction_service: EvictionService,
    pub export_service: ExportService,
}

impl AppState {
    /// Wire the services over the database-backed record store
    pub fn new(config: Config, database: Database, decoder: Arc<dyn VinDecoder>) -> Self {
        let store: Arc<dyn VehicleStore> =
            Arc::new(VehicleSeaOrmRepository::new(database.connection()));

        Self {
            lookup_service: LookupService::new(store.clone(), decoder),
            eviction_service: EvictionService::new(store.clone()),
            export_service: ExportService::new(store, config.storage.temp_dir()),
            database,
            config,
        }
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr =
            format!("{}:{}", state.config.web.host, state.config.web.port).parse()?;
        let app = create_router(state);

        Ok(Self { app, addr })
    }

    /// Serve until SIGTERM/SIGINT
    pub async fn serve(self) -> Result<()> {
        self.serve_with_cancellation(None).await
    }

    /// Serve until the token is cancelled, or until a shutdown signal when no
    /// token is given
    pub async fn serve_with_cancellation(
        self,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;
        info!("Listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(cancellation_token))
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/lookup/{vin}", get(handlers::lookup::lookup_vin))
        .route(
            "/remove/{vin}",
            get(handlers::remove::remove_vin).delete(handlers::remove::remove_vin),
        )
        .route("/export", get(handlers::export::export_vehicles))
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::root::fallback)
        .method_not_allowed_fallback(handlers::root::method_not_allowed)
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(middleware::request_span_middleware))
        .with_state(state)
}

async fn shutdown_signal(cancellation_token: Option<CancellationToken>) {
    if let Some(token) = cancellation_token {
        token.cancelled().await;
        info!("Web server received cancellation signal, shutting down gracefully");
        return;
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers, graceful shutdown disabled: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler, graceful shutdown disabled: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
