//! Sync pipeline: fetch records, aggregate, replace the collections.

use common::RunId;
use derived_store::{DerivedStore, SALES_TOTALS, SEASONALITY, STOCK_ALERTS};
use movements::MovementSource;
use serde::Serialize;

use crate::Result;
use crate::engine::{AggregationEngine, EngineOptions};
use crate::error::PipelineError;

/// Counts reported after a successful sync run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub records_processed: usize,
    pub sales_totals: usize,
    pub stock_alerts: usize,
    pub seasonality: usize,
}

/// One-shot derivation pipeline over a movement source and a derived store.
///
/// A run reads the whole batch, folds it through the engine and replaces
/// the three collections in a fixed order. Collections replaced before a
/// later failure keep their new contents; there is no cross-collection
/// transaction. Callers must not run two pipelines against the same store
/// concurrently — the triggering surface holds a run-level lock.
pub struct SyncPipeline<S, D> {
    source: S,
    store: D,
    engine: AggregationEngine,
}

impl<S: MovementSource, D: DerivedStore> SyncPipeline<S, D> {
    /// Creates a pipeline with default engine options.
    pub fn new(source: S, store: D) -> Self {
        Self {
            source,
            store,
            engine: AggregationEngine::new(),
        }
    }

    /// Creates a pipeline with explicit engine options.
    pub fn with_options(source: S, store: D, options: EngineOptions) -> Self {
        Self {
            source,
            store,
            engine: AggregationEngine::with_options(options),
        }
    }

    /// Runs the pipeline once.
    ///
    /// A validation or aggregation failure aborts before any collection is
    /// touched. A persistence failure is surfaced with the name of the
    /// collection that failed.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = RunId::new();

        let records = self.source.fetch_all().await?;
        let batch = self.engine.run(&records)?;

        self.store
            .replace_sales_totals(&batch.sales_totals)
            .await
            .map_err(|source| PipelineError::Persistence {
                collection: SALES_TOTALS,
                source,
            })?;
        self.store
            .replace_stock_alerts(&batch.stock_alerts)
            .await
            .map_err(|source| PipelineError::Persistence {
                collection: STOCK_ALERTS,
                source,
            })?;
        self.store
            .replace_seasonality(&batch.seasonality)
            .await
            .map_err(|source| PipelineError::Persistence {
                collection: SEASONALITY,
                source,
            })?;

        metrics::counter!("pipeline_runs_total").increment(1);
        metrics::counter!("pipeline_records_processed_total").increment(records.len() as u64);

        let summary = RunSummary {
            run_id,
            records_processed: records.len(),
            sales_totals: batch.sales_totals.len(),
            stock_alerts: batch.stock_alerts.len(),
            seasonality: batch.seasonality.len(),
        };
        tracing::info!(
            %run_id,
            records = summary.records_processed,
            sales_totals = summary.sales_totals,
            stock_alerts = summary.stock_alerts,
            seasonality = summary.seasonality,
            "sync run complete"
        );
        Ok(summary)
    }
}
