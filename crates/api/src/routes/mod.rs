//! HTTP route handlers.

pub mod alerts;
pub mod health;
pub mod metrics;
pub mod sales;
pub mod seasonality;
pub mod sync;
