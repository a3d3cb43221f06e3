//! PostgreSQL-backed derived store implementation.

use async_trait::async_trait;
use common::ProductId;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::{Result, StoreError};
use crate::model::{AlertLevel, SalesTotal, Seasonality, StockAlert};
use crate::store::{DerivedStore, SALES_TOTALS, SEASONALITY, STOCK_ALERTS};

/// PostgreSQL-backed derived store.
///
/// Each collection lives in its own table. A replace runs delete-then-insert
/// inside a single transaction, so an individual collection is never left
/// half-written.
#[derive(Clone)]
pub struct PostgresDerivedStore {
    pool: PgPool,
}

impl PostgresDerivedStore {
    /// Creates a new PostgreSQL derived store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_sales_total(row: PgRow) -> Result<SalesTotal> {
        Ok(SalesTotal {
            product_id: ProductId::new(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            total_sold: row.try_get("total_sold")?,
        })
    }

    fn row_to_stock_alert(row: PgRow) -> Result<StockAlert> {
        let level: String = row.try_get("alert_level")?;
        Ok(StockAlert {
            product_id: ProductId::new(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            current_stock: row.try_get("current_stock")?,
            alert_level: AlertLevel::parse(&level).ok_or(StoreError::InvalidAlertLevel(level))?,
        })
    }

    fn row_to_seasonality(row: PgRow) -> Result<Seasonality> {
        let monthly: serde_json::Value = row.try_get("monthly_sales")?;
        Ok(Seasonality {
            product_id: ProductId::new(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            monthly_sales: serde_json::from_value(monthly)?,
        })
    }
}

#[async_trait]
impl DerivedStore for PostgresDerivedStore {
    async fn replace_sales_totals(&self, rows: &[SalesTotal]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sales_totals").execute(&mut *tx).await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO sales_totals (product_id, product_name, total_sold)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(row.product_id.as_i64())
            .bind(&row.product_name)
            .bind(row.total_sold)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(collection = SALES_TOTALS, rows = rows.len(), "collection replaced");
        Ok(())
    }

    async fn replace_stock_alerts(&self, rows: &[StockAlert]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stock_alerts").execute(&mut *tx).await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO stock_alerts (product_id, product_name, current_stock, alert_level)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.product_id.as_i64())
            .bind(&row.product_name)
            .bind(row.current_stock)
            .bind(row.alert_level.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(collection = STOCK_ALERTS, rows = rows.len(), "collection replaced");
        Ok(())
    }

    async fn replace_seasonality(&self, rows: &[Seasonality]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM seasonality").execute(&mut *tx).await?;

        for row in rows {
            let monthly = serde_json::to_value(row.monthly_sales)?;
            sqlx::query(
                r#"
                INSERT INTO seasonality (product_id, product_name, monthly_sales)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(row.product_id.as_i64())
            .bind(&row.product_name)
            .bind(monthly)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(collection = SEASONALITY, rows = rows.len(), "collection replaced");
        Ok(())
    }

    async fn list_sales_totals(&self) -> Result<Vec<SalesTotal>> {
        let rows = sqlx::query(
            "SELECT product_id, product_name, total_sold FROM sales_totals ORDER BY product_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_sales_total).collect()
    }

    async fn list_stock_alerts(&self) -> Result<Vec<StockAlert>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, product_name, current_stock, alert_level
            FROM stock_alerts
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_stock_alert).collect()
    }

    async fn list_seasonality(&self) -> Result<Vec<Seasonality>> {
        let rows = sqlx::query(
            "SELECT product_id, product_name, monthly_sales FROM seasonality ORDER BY product_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_seasonality).collect()
    }
}
