//! Core trait for derived collection stores.

use async_trait::async_trait;

use crate::Result;
use crate::model::{SalesTotal, Seasonality, StockAlert};

/// Name of the sales totals collection.
pub const SALES_TOTALS: &str = "sales_totals";

/// Name of the stock alerts collection.
pub const STOCK_ALERTS: &str = "stock_alerts";

/// Name of the seasonality collection.
pub const SEASONALITY: &str = "seasonality";

/// Persistence collaborator for the three derived collections.
///
/// Each `replace_*` call discards every existing row of its collection and
/// inserts the given rows; derived state is never merged with prior state.
/// The three collections are replaced independently — cross-collection
/// atomicity is the calling pipeline's concern, not the store's.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DerivedStore: Send + Sync {
    /// Replaces the `sales_totals` collection with the given rows.
    async fn replace_sales_totals(&self, rows: &[SalesTotal]) -> Result<()>;

    /// Replaces the `stock_alerts` collection with the given rows.
    async fn replace_stock_alerts(&self, rows: &[StockAlert]) -> Result<()>;

    /// Replaces the `seasonality` collection with the given rows.
    async fn replace_seasonality(&self, rows: &[Seasonality]) -> Result<()>;

    /// Returns all sales totals, ordered by product id.
    async fn list_sales_totals(&self) -> Result<Vec<SalesTotal>>;

    /// Returns all stock alerts, ordered by product id.
    async fn list_stock_alerts(&self) -> Result<Vec<StockAlert>>;

    /// Returns all seasonality rows, ordered by product id.
    async fn list_seasonality(&self) -> Result<Vec<Seasonality>>;
}
