//! Movement record model and field parsing rules.

use chrono::NaiveDateTime;
use common::ProductId;
use serde::{Deserialize, Serialize};

/// Exact pattern textual movement timestamps must match (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Stock entering the warehouse.
    #[serde(rename = "entrada")]
    Inbound,

    /// Stock leaving the warehouse — counted as a sale.
    #[serde(rename = "salida")]
    Outbound,
}

impl MovementType {
    /// Parses the wire value carried by movement files.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entrada" => Some(MovementType::Inbound),
            "salida" => Some(MovementType::Outbound),
            _ => None,
        }
    }

    /// Returns the wire value for this movement type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "entrada",
            MovementType::Outbound => "salida",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a textual timestamp.
///
/// Only the exact `YYYY-MM-DD HH:MM:SS` form is accepted; anything else is
/// a fatal input error for the run that carried it.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// Fallback display name for products never named by any record.
///
/// This is the only place a product name is synthesized.
pub fn product_display_name(product_id: ProductId) -> String {
    format!("Producto {product_id}")
}

/// One raw inventory movement, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// The product this movement belongs to.
    pub product_id: ProductId,

    /// Name carried by the record itself, if any.
    pub product_name: Option<String>,

    /// Whether stock moved in or out.
    pub movement_type: MovementType,

    /// Units moved. Non-negative by convention; negatives are passed
    /// through unless the engine's reject policy is enabled.
    pub quantity: i64,

    /// When the movement happened.
    pub timestamp: NaiveDateTime,
}

impl MovementRecord {
    /// Creates a record without a product name.
    pub fn new(
        product_id: impl Into<ProductId>,
        movement_type: MovementType,
        quantity: i64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: None,
            movement_type,
            quantity,
            timestamp,
        }
    }

    /// Attaches the record-level product name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }
}
