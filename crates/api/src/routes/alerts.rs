//! Stock alert distribution endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use derived_store::{AlertLevel, DerivedStore};
use movements::MovementSource;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::sales::ChartData;

/// GET /stock/alerts — number of products at each alert level.
pub async fn distribution<S, D>(
    State(state): State<Arc<AppState<S, D>>>,
) -> Result<Json<ChartData>, ApiError>
where
    S: MovementSource,
    D: DerivedStore + Clone,
{
    let rows = state.store.list_stock_alerts().await?;

    let values = AlertLevel::ALL
        .iter()
        .map(|level| rows.iter().filter(|r| r.alert_level == *level).count() as i64)
        .collect();

    Ok(Json(ChartData {
        labels: AlertLevel::ALL.iter().map(|l| l.as_str().to_string()).collect(),
        values,
    }))
}
