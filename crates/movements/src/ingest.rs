//! CSV ingest and validation for movement records.
//!
//! The movement file is a plain CSV with one row per movement, using the
//! upstream column names: `producto_id`, `nombre_producto` (optional),
//! `tipo` (`entrada`/`salida`), `cantidad`, `fecha`.
//!
//! Validation is eager and strict: the first invalid row aborts the whole
//! read with an error naming the line and the offending field, so a run
//! never operates on a partially validated batch.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use common::ProductId;
use serde::Deserialize;

use crate::error::{Result, ValidationError};
use crate::record::{MovementRecord, MovementType, parse_timestamp};
use crate::source::MovementSource;

/// Movement source backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvMovementSource {
    path: PathBuf,
}

impl CsvMovementSource {
    /// Creates a source reading from the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MovementSource for CsvMovementSource {
    async fn fetch_all(&self) -> Result<Vec<MovementRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)?;
            read_records(file)
        })
        .await
        .map_err(|e| ValidationError::Io(std::io::Error::other(e)))?
    }
}

/// Reads and validates movement records from CSV data.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<MovementRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        // Line 1 is the header row.
        let line = index + 2;
        records.push(row?.validate(line)?);
    }
    tracing::debug!(rows = records.len(), "csv read complete");
    Ok(records)
}

/// One CSV row before validation.
///
/// Every field is optional so that an absent value can be reported by
/// field name rather than as an opaque deserialization error.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, rename = "producto_id")]
    product_id: Option<i64>,

    #[serde(default, rename = "nombre_producto")]
    product_name: Option<String>,

    #[serde(default, rename = "tipo")]
    movement_type: Option<String>,

    #[serde(default, rename = "cantidad")]
    quantity: Option<i64>,

    #[serde(default, rename = "fecha")]
    timestamp: Option<String>,
}

impl RawRow {
    fn validate(self, line: usize) -> Result<MovementRecord> {
        let product_id = self.product_id.ok_or(ValidationError::MissingField {
            line,
            field: "producto_id",
        })?;

        let raw_type = self
            .movement_type
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingField { line, field: "tipo" })?;
        let movement_type = MovementType::parse(&raw_type)
            .ok_or(ValidationError::UnknownMovementType {
                line,
                value: raw_type,
            })?;

        let quantity = self.quantity.ok_or(ValidationError::MissingField {
            line,
            field: "cantidad",
        })?;

        let raw_timestamp = self
            .timestamp
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingField { line, field: "fecha" })?;
        let timestamp =
            parse_timestamp(&raw_timestamp).map_err(|_| ValidationError::MalformedTimestamp {
                line,
                value: raw_timestamp,
            })?;

        Ok(MovementRecord {
            product_id: ProductId::new(product_id),
            product_name: self.product_name.filter(|n| !n.is_empty()),
            movement_type,
            quantity,
            timestamp,
        })
    }
}
