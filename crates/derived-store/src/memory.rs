//! In-memory derived store implementation for testing and default wiring.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::model::{SalesTotal, Seasonality, StockAlert};
use crate::store::DerivedStore;

/// In-memory derived store.
///
/// Holds the three collections behind `RwLock`s and provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryDerivedStore {
    sales_totals: Arc<RwLock<Vec<SalesTotal>>>,
    stock_alerts: Arc<RwLock<Vec<StockAlert>>>,
    seasonality: Arc<RwLock<Vec<Seasonality>>>,
}

impl InMemoryDerivedStore {
    /// Creates a new store with all three collections empty.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DerivedStore for InMemoryDerivedStore {
    async fn replace_sales_totals(&self, rows: &[SalesTotal]) -> Result<()> {
        *self.sales_totals.write().await = rows.to_vec();
        Ok(())
    }

    async fn replace_stock_alerts(&self, rows: &[StockAlert]) -> Result<()> {
        *self.stock_alerts.write().await = rows.to_vec();
        Ok(())
    }

    async fn replace_seasonality(&self, rows: &[Seasonality]) -> Result<()> {
        *self.seasonality.write().await = rows.to_vec();
        Ok(())
    }

    async fn list_sales_totals(&self) -> Result<Vec<SalesTotal>> {
        Ok(self.sales_totals.read().await.clone())
    }

    async fn list_stock_alerts(&self) -> Result<Vec<StockAlert>> {
        Ok(self.stock_alerts.read().await.clone())
    }

    async fn list_seasonality(&self) -> Result<Vec<Seasonality>> {
        Ok(self.seasonality.read().await.clone())
    }
}
