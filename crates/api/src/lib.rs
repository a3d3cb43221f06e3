//! HTTP API server for the inventory analytics system.
//!
//! Triggers the derivation pipeline and serves the three derived
//! collections to reporting consumers, with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use analytics::{EngineOptions, SyncPipeline};
use axum::Router;
use axum::routing::{get, post};
use derived_store::DerivedStore;
use metrics_exporter_prometheus::PrometheusHandle;
use movements::MovementSource;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: MovementSource, D: DerivedStore> {
    pub pipeline: SyncPipeline<S, D>,
    pub store: D,
    /// Serializes pipeline runs: concurrent runs race on the replace-all
    /// persistence step, so at most one may be active against the store.
    pub sync_lock: Mutex<()>,
}

/// Creates the application state around a movement source and a store.
pub fn create_state<S: MovementSource, D: DerivedStore + Clone>(
    source: S,
    store: D,
    options: EngineOptions,
) -> Arc<AppState<S, D>> {
    Arc::new(AppState {
        pipeline: SyncPipeline::with_options(source, store.clone(), options),
        store,
        sync_lock: Mutex::new(()),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, D>(state: Arc<AppState<S, D>>, metrics_handle: PrometheusHandle) -> Router
where
    S: MovementSource + 'static,
    D: DerivedStore + Clone + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/sync", post(routes::sync::run::<S, D>))
        .route("/sales/top", get(routes::sales::top::<S, D>))
        .route("/stock/alerts", get(routes::alerts::distribution::<S, D>))
        .route(
            "/sales/seasonality",
            get(routes::seasonality::curves::<S, D>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
