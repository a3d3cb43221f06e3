//! Derivation pipeline for the inventory analytics system.
//!
//! The core of the system: a single-pass aggregation of movement records
//! into the three reporting collections, and the pipeline that feeds them
//! to a derived store with replace-all semantics.
//!
//! - [`AggregationEngine`] — the pure fold over one record batch
//! - [`SyncPipeline`] — fetch → aggregate → replace, one run at a time
//! - [`EngineOptions`] — configurable quantity policies

pub mod engine;
pub mod error;
pub mod pipeline;

pub use engine::{AggregationEngine, DerivedBatch, EngineOptions};
pub use error::{EngineError, PipelineError, Result};
pub use pipeline::{RunSummary, SyncPipeline};
