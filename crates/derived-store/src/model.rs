//! Row types for the three derived collections.

use chrono::{Datelike, NaiveDateTime};
use common::ProductId;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stock strictly below this value is CRITICAL.
pub const CRITICAL_STOCK_THRESHOLD: i64 = 10;

/// Stock strictly below this value (and at or above the critical
/// threshold) is LOW. At or above it, stock is NORMAL.
pub const LOW_STOCK_THRESHOLD: i64 = 50;

/// Alert level derived from a product's current stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Critical,
    Low,
    Normal,
}

impl AlertLevel {
    /// All levels, in severity order.
    pub const ALL: [AlertLevel; 3] = [AlertLevel::Critical, AlertLevel::Low, AlertLevel::Normal];

    /// Derives the alert level from a final stock value.
    ///
    /// This is the only place the thresholds are applied.
    pub fn for_stock(stock: i64) -> Self {
        if stock < CRITICAL_STOCK_THRESHOLD {
            AlertLevel::Critical
        } else if stock < LOW_STOCK_THRESHOLD {
            AlertLevel::Low
        } else {
            AlertLevel::Normal
        }
    }

    /// Returns the stored/reported label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "CRITICAL",
            AlertLevel::Low => "LOW",
            AlertLevel::Normal => "NORMAL",
        }
    }

    /// Parses a stored label back into a level.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CRITICAL" => Some(AlertLevel::Critical),
            "LOW" => Some(AlertLevel::Low),
            "NORMAL" => Some(AlertLevel::Normal),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month used for seasonality bucketing.
///
/// Years are not distinguished: every January of any year shares one
/// bucket. Bucket keys are the lowercase month names used by the reporting
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Enero,
        Month::Febrero,
        Month::Marzo,
        Month::Abril,
        Month::Mayo,
        Month::Junio,
        Month::Julio,
        Month::Agosto,
        Month::Septiembre,
        Month::Octubre,
        Month::Noviembre,
        Month::Diciembre,
    ];

    /// Returns the calendar month of a timestamp.
    pub fn of(timestamp: NaiveDateTime) -> Self {
        Self::ALL[timestamp.month0() as usize]
    }

    /// Returns the bucket key used in serialized seasonality maps.
    pub fn name(&self) -> &'static str {
        match self {
            Month::Enero => "enero",
            Month::Febrero => "febrero",
            Month::Marzo => "marzo",
            Month::Abril => "abril",
            Month::Mayo => "mayo",
            Month::Junio => "junio",
            Month::Julio => "julio",
            Month::Agosto => "agosto",
            Month::Septiembre => "septiembre",
            Month::Octubre => "octubre",
            Month::Noviembre => "noviembre",
            Month::Diciembre => "diciembre",
        }
    }

    /// Parses a bucket key back into a month.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Summed OUTBOUND quantity per calendar month.
///
/// All twelve buckets always exist with a zero default, so serialized maps
/// carry every month and accumulation is a plain indexed add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySales([i64; 12]);

impl MonthlySales {
    /// Returns the all-zero profile.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Adds sold quantity to a month's bucket.
    pub fn add(&mut self, month: Month, quantity: i64) {
        self.0[month.index()] += quantity;
    }

    /// Overwrites a month's bucket.
    pub fn set(&mut self, month: Month, quantity: i64) {
        self.0[month.index()] = quantity;
    }

    /// Returns a month's bucket.
    pub fn get(&self, month: Month) -> i64 {
        self.0[month.index()]
    }

    /// Returns the sum across all twelve buckets.
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }

    /// Returns the buckets in calendar order, January first.
    pub fn as_series(&self) -> [i64; 12] {
        self.0
    }
}

impl Serialize for MonthlySales {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for month in Month::ALL {
            map.serialize_entry(month.name(), &self.get(month))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthlySales {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MonthMapVisitor;

        impl<'de> Visitor<'de> for MonthMapVisitor {
            type Value = MonthlySales;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from month names to quantities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut sales = MonthlySales::zero();
                while let Some((key, value)) = map.next_entry::<String, i64>()? {
                    let month = Month::from_name(&key)
                        .ok_or_else(|| de::Error::custom(format!("unknown month name `{key}`")))?;
                    sales.set(month, value);
                }
                // Months absent from the map keep the zero default.
                Ok(sales)
            }
        }

        deserializer.deserialize_map(MonthMapVisitor)
    }
}

/// Aggregate sales per product across the whole input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTotal {
    pub product_id: ProductId,
    pub product_name: String,
    /// Sum of quantities across every OUTBOUND record for this product.
    pub total_sold: i64,
}

/// Current stock position of a product and its derived alert level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_id: ProductId,
    pub product_name: String,
    /// Signed running total: +quantity on INBOUND, −quantity on OUTBOUND.
    /// May be negative when the input data is inconsistent.
    pub current_stock: i64,
    pub alert_level: AlertLevel,
}

/// Twelve-month sales profile of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seasonality {
    pub product_id: ProductId,
    pub product_name: String,
    pub monthly_sales: MonthlySales,
}
