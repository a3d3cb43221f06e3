//! Seasonality curves endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use derived_store::{DerivedStore, Month};
use movements::MovementSource;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    #[serde(default = "default_sample")]
    pub sample: usize,
}

fn default_sample() -> usize {
    5
}

/// Chart-ready month labels plus one dataset per sampled product.
#[derive(Debug, Serialize)]
pub struct SeasonalityChart {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: [i64; 12],
}

/// GET /sales/seasonality — twelve-month curves for a random product sample.
pub async fn curves<S, D>(
    State(state): State<Arc<AppState<S, D>>>,
    Query(query): Query<SampleQuery>,
) -> Result<Json<SeasonalityChart>, ApiError>
where
    S: MovementSource,
    D: DerivedStore + Clone,
{
    let rows = state.store.list_seasonality().await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("no seasonality data".to_string()));
    }

    let mut rng = rand::thread_rng();
    let datasets = rows
        .choose_multiple(&mut rng, query.sample)
        .map(|row| Dataset {
            label: row.product_name.clone(),
            data: row.monthly_sales.as_series(),
        })
        .collect();

    Ok(Json(SeasonalityChart {
        labels: Month::ALL.iter().map(|m| m.name()).collect(),
        datasets,
    }))
}
