//! Movement record ingestion for the inventory analytics system.
//!
//! This crate provides the input side of the derivation pipeline:
//! - [`MovementRecord`] — one validated inventory movement
//! - [`MovementSource`] trait for reading an ordered batch once per run
//! - [`CsvMovementSource`] for the movement CSV file
//! - [`InMemoryMovementSource`] for tests

pub mod error;
pub mod ingest;
pub mod memory;
pub mod record;
pub mod source;

pub use error::{Result, ValidationError};
pub use ingest::{CsvMovementSource, read_records};
pub use memory::InMemoryMovementSource;
pub use record::{
    MovementRecord, MovementType, TIMESTAMP_FORMAT, parse_timestamp, product_display_name,
};
pub use source::MovementSource;
