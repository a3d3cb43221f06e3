//! Single-pass aggregation of movement records into the derived batch.

use std::collections::BTreeMap;

use common::ProductId;
use derived_store::{AlertLevel, Month, MonthlySales, SalesTotal, Seasonality, StockAlert};
use movements::{MovementRecord, MovementType, product_display_name};

use crate::error::EngineError;

/// Quantity policies for one engine run.
///
/// Both default to off: upstream data is known to contain negative
/// quantities and overselling, and they pass through uncorrected unless a
/// policy is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Reject any record whose quantity is negative.
    pub reject_negative_quantity: bool,

    /// Reject an OUTBOUND record that would drive a product's running
    /// stock below zero.
    pub reject_negative_stock: bool,
}

/// The three derived collections produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedBatch {
    pub sales_totals: Vec<SalesTotal>,
    pub stock_alerts: Vec<StockAlert>,
    pub seasonality: Vec<Seasonality>,
}

/// Single-pass batch aggregator for movement records.
///
/// One [`run`](AggregationEngine::run) folds the whole input batch through
/// three accumulators keyed by product id and materializes the derived
/// collections. The engine is pure: it holds no state between runs and
/// performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine {
    options: EngineOptions,
}

impl AggregationEngine {
    /// Creates an engine with default (permissive) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with explicit quantity policies.
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Derives the three collections from an ordered record batch.
    ///
    /// Accumulators are initialized lazily per product on first sight with
    /// a zero default. Products with no OUTBOUND activity get no sales or
    /// seasonality row; any activity at all yields a stock alert row.
    /// Output rows are ordered by product id, so equal inputs produce
    /// byte-identical collections.
    pub fn run(&self, records: &[MovementRecord]) -> Result<DerivedBatch, EngineError> {
        let mut sales: BTreeMap<ProductId, i64> = BTreeMap::new();
        let mut stock: BTreeMap<ProductId, i64> = BTreeMap::new();
        let mut monthly: BTreeMap<ProductId, MonthlySales> = BTreeMap::new();
        // Most recent record-level name per product.
        let mut names: BTreeMap<ProductId, String> = BTreeMap::new();

        for record in records {
            if self.options.reject_negative_quantity && record.quantity < 0 {
                return Err(EngineError::NegativeQuantity {
                    product_id: record.product_id,
                    quantity: record.quantity,
                });
            }

            if let Some(name) = &record.product_name {
                names.insert(record.product_id, name.clone());
            }

            match record.movement_type {
                MovementType::Inbound => {
                    *stock.entry(record.product_id).or_insert(0) += record.quantity;
                }
                MovementType::Outbound => {
                    let current = stock.entry(record.product_id).or_insert(0);
                    if self.options.reject_negative_stock && *current - record.quantity < 0 {
                        return Err(EngineError::InsufficientStock {
                            product_id: record.product_id,
                            requested: record.quantity,
                            available: *current,
                        });
                    }
                    *current -= record.quantity;

                    *sales.entry(record.product_id).or_insert(0) += record.quantity;
                    monthly
                        .entry(record.product_id)
                        .or_default()
                        .add(Month::of(record.timestamp), record.quantity);
                }
            }
        }

        let resolve = |product_id: ProductId| -> String {
            names
                .get(&product_id)
                .cloned()
                .unwrap_or_else(|| product_display_name(product_id))
        };

        let sales_totals = sales
            .into_iter()
            .map(|(product_id, total_sold)| SalesTotal {
                product_id,
                product_name: resolve(product_id),
                total_sold,
            })
            .collect();

        let stock_alerts = stock
            .into_iter()
            .map(|(product_id, current_stock)| StockAlert {
                product_id,
                product_name: resolve(product_id),
                current_stock,
                alert_level: AlertLevel::for_stock(current_stock),
            })
            .collect();

        let seasonality = monthly
            .into_iter()
            .map(|(product_id, monthly_sales)| Seasonality {
                product_id,
                product_name: resolve(product_id),
                monthly_sales,
            })
            .collect();

        Ok(DerivedBatch {
            sales_totals,
            stock_alerts,
            seasonality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movements::parse_timestamp;

    fn rec(id: i64, ty: MovementType, quantity: i64, ts: &str) -> MovementRecord {
        MovementRecord::new(id, ty, quantity, parse_timestamp(ts).unwrap())
    }

    #[test]
    fn single_product_scenario() {
        let engine = AggregationEngine::new();
        let batch = engine
            .run(&[
                rec(1, MovementType::Inbound, 100, "2024-01-01 00:00:00"),
                rec(1, MovementType::Outbound, 30, "2024-01-15 00:00:00"),
                rec(1, MovementType::Outbound, 20, "2024-02-01 00:00:00"),
            ])
            .unwrap();

        assert_eq!(batch.sales_totals.len(), 1);
        assert_eq!(batch.sales_totals[0].total_sold, 50);
        assert_eq!(batch.sales_totals[0].product_name, "Producto 1");

        assert_eq!(batch.stock_alerts.len(), 1);
        assert_eq!(batch.stock_alerts[0].current_stock, 50);
        assert_eq!(batch.stock_alerts[0].alert_level, AlertLevel::Normal);

        assert_eq!(batch.seasonality.len(), 1);
        let monthly = &batch.seasonality[0].monthly_sales;
        assert_eq!(monthly.get(Month::Enero), 30);
        assert_eq!(monthly.get(Month::Febrero), 20);
        assert_eq!(monthly.get(Month::Marzo), 0);
        assert_eq!(monthly.total(), 50);
    }

    #[test]
    fn inbound_only_product_appears_in_alerts_only() {
        let engine = AggregationEngine::new();
        let batch = engine
            .run(&[rec(9, MovementType::Inbound, 5, "2024-03-01 00:00:00")])
            .unwrap();

        assert!(batch.sales_totals.is_empty());
        assert!(batch.seasonality.is_empty());
        assert_eq!(batch.stock_alerts.len(), 1);
        assert_eq!(batch.stock_alerts[0].current_stock, 5);
        assert_eq!(batch.stock_alerts[0].alert_level, AlertLevel::Critical);
    }

    #[test]
    fn totals_equal_outbound_sum_and_stock_equals_net() {
        let engine = AggregationEngine::new();
        let records = vec![
            rec(1, MovementType::Inbound, 60, "2024-01-01 00:00:00"),
            rec(2, MovementType::Inbound, 10, "2024-01-02 00:00:00"),
            rec(1, MovementType::Outbound, 25, "2024-04-05 00:00:00"),
            rec(2, MovementType::Outbound, 4, "2024-05-06 00:00:00"),
            rec(1, MovementType::Outbound, 5, "2024-04-20 00:00:00"),
        ];
        let batch = engine.run(&records).unwrap();

        let outbound_sum: i64 = records
            .iter()
            .filter(|r| r.movement_type == MovementType::Outbound)
            .map(|r| r.quantity)
            .sum();
        let derived_sum: i64 = batch.sales_totals.iter().map(|s| s.total_sold).sum();
        assert_eq!(derived_sum, outbound_sum);

        let p1 = &batch.stock_alerts[0];
        assert_eq!(p1.current_stock, 60 - 25 - 5);
        let p2 = &batch.stock_alerts[1];
        assert_eq!(p2.current_stock, 10 - 4);
    }

    #[test]
    fn seasonality_sum_equals_total_sold_per_product() {
        let engine = AggregationEngine::new();
        let batch = engine
            .run(&[
                rec(1, MovementType::Outbound, 7, "2023-06-01 00:00:00"),
                rec(1, MovementType::Outbound, 3, "2024-06-15 00:00:00"),
                rec(1, MovementType::Outbound, 2, "2024-11-01 00:00:00"),
            ])
            .unwrap();

        assert_eq!(batch.sales_totals[0].total_sold, 12);
        assert_eq!(batch.seasonality[0].monthly_sales.total(), 12);
        // Years collapse: both June sales land in the same bucket.
        assert_eq!(batch.seasonality[0].monthly_sales.get(Month::Junio), 10);
    }

    #[test]
    fn alert_levels_at_threshold_boundaries() {
        let engine = AggregationEngine::new();
        let records: Vec<_> = [(1, 9), (2, 10), (3, 49), (4, 50)]
            .into_iter()
            .map(|(id, qty)| rec(id, MovementType::Inbound, qty, "2024-01-01 00:00:00"))
            .collect();
        let batch = engine.run(&records).unwrap();

        let levels: Vec<_> = batch.stock_alerts.iter().map(|a| a.alert_level).collect();
        assert_eq!(
            levels,
            vec![
                AlertLevel::Critical,
                AlertLevel::Low,
                AlertLevel::Low,
                AlertLevel::Normal
            ]
        );
    }

    #[test]
    fn outbound_without_stock_goes_negative_by_default() {
        let engine = AggregationEngine::new();
        let batch = engine
            .run(&[rec(1, MovementType::Outbound, 8, "2024-01-01 00:00:00")])
            .unwrap();

        assert_eq!(batch.stock_alerts[0].current_stock, -8);
        assert_eq!(batch.stock_alerts[0].alert_level, AlertLevel::Critical);
        assert_eq!(batch.sales_totals[0].total_sold, 8);
    }

    #[test]
    fn record_level_name_wins_over_synthesis() {
        let engine = AggregationEngine::new();
        let ts = parse_timestamp("2024-01-01 00:00:00").unwrap();
        let batch = engine
            .run(&[
                MovementRecord::new(1, MovementType::Inbound, 10, ts).with_name("Tornillos"),
                MovementRecord::new(1, MovementType::Outbound, 2, ts).with_name("Tornillos M4"),
                MovementRecord::new(2, MovementType::Outbound, 1, ts),
            ])
            .unwrap();

        // Most recent name wins; unnamed products get the synthesized name.
        assert_eq!(batch.stock_alerts[0].product_name, "Tornillos M4");
        assert_eq!(batch.sales_totals[0].product_name, "Tornillos M4");
        assert_eq!(batch.sales_totals[1].product_name, "Producto 2");
    }

    #[test]
    fn reject_negative_quantity_policy() {
        let engine = AggregationEngine::with_options(EngineOptions {
            reject_negative_quantity: true,
            ..EngineOptions::default()
        });
        let result = engine.run(&[rec(1, MovementType::Inbound, -5, "2024-01-01 00:00:00")]);

        match result {
            Err(EngineError::NegativeQuantity {
                product_id,
                quantity,
            }) => {
                assert_eq!(product_id, ProductId::new(1));
                assert_eq!(quantity, -5);
            }
            other => panic!("expected NegativeQuantity, got {other:?}"),
        }
    }

    #[test]
    fn reject_negative_stock_policy() {
        let engine = AggregationEngine::with_options(EngineOptions {
            reject_negative_stock: true,
            ..EngineOptions::default()
        });

        // Selling exactly the available stock is fine.
        let ok = engine.run(&[
            rec(1, MovementType::Inbound, 10, "2024-01-01 00:00:00"),
            rec(1, MovementType::Outbound, 10, "2024-01-02 00:00:00"),
        ]);
        assert!(ok.is_ok());

        // One unit more is not.
        let result = engine.run(&[
            rec(1, MovementType::Inbound, 10, "2024-01-01 00:00:00"),
            rec(1, MovementType::Outbound, 11, "2024-01-02 00:00:00"),
        ]);
        match result {
            Err(EngineError::InsufficientStock {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 11);
                assert_eq!(available, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn equal_inputs_produce_byte_identical_collections() {
        let engine = AggregationEngine::new();
        let records = vec![
            rec(3, MovementType::Inbound, 40, "2024-02-01 00:00:00"),
            rec(1, MovementType::Outbound, 7, "2024-02-02 00:00:00"),
            rec(3, MovementType::Outbound, 12, "2024-07-09 00:00:00"),
        ];

        let first = engine.run(&records).unwrap();
        let second = engine.run(&records).unwrap();

        assert_eq!(
            serde_json::to_string(&first.sales_totals).unwrap(),
            serde_json::to_string(&second.sales_totals).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first.stock_alerts).unwrap(),
            serde_json::to_string(&second.stock_alerts).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first.seasonality).unwrap(),
            serde_json::to_string(&second.seasonality).unwrap()
        );
    }

    #[test]
    fn empty_batch_yields_empty_collections() {
        let engine = AggregationEngine::new();
        let batch = engine.run(&[]).unwrap();
        assert!(batch.sales_totals.is_empty());
        assert!(batch.stock_alerts.is_empty());
        assert!(batch.seasonality.is_empty());
    }
}
