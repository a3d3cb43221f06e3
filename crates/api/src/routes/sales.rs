//! Top sellers endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use derived_store::DerivedStore;
use movements::MovementSource;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Chart-ready labels/values payload.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// GET /sales/top — top products by total sold, descending.
pub async fn top<S, D>(
    State(state): State<Arc<AppState<S, D>>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<ChartData>, ApiError>
where
    S: MovementSource,
    D: DerivedStore + Clone,
{
    let mut rows = state.store.list_sales_totals().await?;
    rows.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
    rows.truncate(query.limit);

    Ok(Json(ChartData {
        labels: rows.iter().map(|r| r.product_name.clone()).collect(),
        values: rows.iter().map(|r| r.total_sold).collect(),
    }))
}
