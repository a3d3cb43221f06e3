//! Derived reporting collections for the inventory analytics system.
//!
//! This crate provides the output side of the derivation pipeline:
//! - Row types for the three collections: [`SalesTotal`], [`StockAlert`],
//!   [`Seasonality`]
//! - [`DerivedStore`] trait with replace-all semantics per collection
//! - [`InMemoryDerivedStore`] and [`PostgresDerivedStore`] implementations

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryDerivedStore;
pub use model::{AlertLevel, Month, MonthlySales, SalesTotal, Seasonality, StockAlert};
pub use postgres::PostgresDerivedStore;
pub use store::{DerivedStore, SALES_TOTALS, SEASONALITY, STOCK_ALERTS};
