//! Engine and pipeline error types.

use common::ProductId;
use derived_store::StoreError;
use movements::ValidationError;
use thiserror::Error;

/// Errors raised by the aggregation engine's quantity policies.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A record carried a negative quantity while the reject policy was on.
    #[error("negative quantity {quantity} for product {product_id}")]
    NegativeQuantity { product_id: ProductId, quantity: i64 },

    /// An OUTBOUND record would drive running stock below zero while the
    /// reject policy was on.
    #[error(
        "outbound quantity {requested} exceeds available stock {available} for product {product_id}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },
}

/// Errors that can fail a sync run.
///
/// Validation and engine errors abort the run before any collection is
/// touched. A persistence error names the failing collection; collections
/// already replaced earlier in the same run keep their new contents.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input batch failed validation.
    #[error("input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A quantity policy rejected the batch.
    #[error("aggregation failed: {0}")]
    Engine(#[from] EngineError),

    /// Replacing a derived collection failed.
    #[error("failed to replace collection `{collection}`: {source}")]
    Persistence {
        collection: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
