//! Pipeline trigger endpoint.

use std::sync::Arc;

use analytics::RunSummary;
use axum::Json;
use axum::extract::State;
use derived_store::DerivedStore;
use movements::MovementSource;

use crate::AppState;
use crate::error::ApiError;

/// POST /sync — runs the derivation pipeline once.
///
/// The run lock guarantees at most one active run against the store; a
/// second trigger while a run is in flight gets 409.
pub async fn run<S, D>(
    State(state): State<Arc<AppState<S, D>>>,
) -> Result<Json<RunSummary>, ApiError>
where
    S: MovementSource,
    D: DerivedStore + Clone,
{
    let Ok(_guard) = state.sync_lock.try_lock() else {
        return Err(ApiError::SyncInProgress);
    };

    let summary = state.pipeline.run().await?;
    Ok(Json(summary))
}
