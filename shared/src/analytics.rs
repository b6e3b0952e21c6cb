//! Workshop KPI aggregation
//!
//! Derives the dashboard snapshot (revenue, work-in-progress count, stock
//! alerts, top sellers) from the current order and material state, gated by
//! workflow stage. Every call recomputes from scratch; with per-workshop data
//! volumes this is cheaper than keeping incremental aggregates correct.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Material, WorkflowStage};
use crate::money;

/// How many top sellers the snapshot reports
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// The stage and price of one order, as the aggregator consumes it
#[derive(Debug, Clone)]
pub struct OrderFacts {
    pub workflow_stage: WorkflowStage,
    pub total_price: Decimal,
}

/// One order item joined with its order's stage and product name
#[derive(Debug, Clone)]
pub struct DemandLine {
    pub product_version_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub workflow_stage: WorkflowStage,
}

/// A material currently below its alert threshold
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StockAlertItem {
    pub id: Uuid,
    pub name: String,
}

/// One of the best-selling product versions
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TopProduct {
    pub product_name: String,
    pub quantity_sold: i64,
}

/// Workshop-scoped KPI snapshot
#[derive(Debug, Clone, Serialize)]
pub struct KpiSnapshot {
    pub total_revenue: f64,
    pub orders_in_progress: u64,
    pub stock_alerts_count: u64,
    pub stock_alert_items: Vec<StockAlertItem>,
    pub top_products: Vec<TopProduct>,
}

/// Compute the KPI snapshot for one workshop.
///
/// Revenue counts SHIPPED orders only. Orders in progress count the five
/// production stages, excluding the PENDING queue and SHIPPED. Top products
/// rank summed item quantities over confirmed demand (any stage but PENDING);
/// ties keep the input order, which is not otherwise specified. Empty inputs
/// yield a zeroed snapshot.
pub fn aggregate_kpis(
    orders: &[OrderFacts],
    demand: &[DemandLine],
    materials: &[Material],
) -> KpiSnapshot {
    let total_revenue: Decimal = orders
        .iter()
        .filter(|o| o.workflow_stage.counts_as_revenue())
        .map(|o| o.total_price)
        .sum();

    let orders_in_progress = orders
        .iter()
        .filter(|o| o.workflow_stage.is_in_production())
        .count() as u64;

    let stock_alert_items: Vec<StockAlertItem> = materials
        .iter()
        .filter(|m| m.is_low_stock())
        .map(|m| StockAlertItem {
            id: m.id,
            name: m.name.clone(),
        })
        .collect();

    KpiSnapshot {
        total_revenue: money::to_amount(total_revenue),
        orders_in_progress,
        stock_alerts_count: stock_alert_items.len() as u64,
        stock_alert_items,
        top_products: top_products(demand),
    }
}

/// Rank product versions by summed quantity over confirmed demand. A linear
/// scan keeps first-seen order for ties; the stable sort preserves it.
fn top_products(demand: &[DemandLine]) -> Vec<TopProduct> {
    let mut totals: Vec<(Uuid, String, i64)> = Vec::new();

    for line in demand {
        if !line.workflow_stage.counts_as_demand() {
            continue;
        }
        match totals.iter_mut().find(|(id, _, _)| *id == line.product_version_id) {
            Some((_, _, qty)) => *qty += i64::from(line.quantity),
            None => totals.push((
                line.product_version_id,
                line.product_name.clone(),
                i64::from(line.quantity),
            )),
        }
    }

    totals.sort_by(|a, b| b.2.cmp(&a.2));
    totals.truncate(TOP_PRODUCTS_LIMIT);
    totals
        .into_iter()
        .map(|(_, product_name, quantity_sold)| TopProduct {
            product_name,
            quantity_sold,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialCategory;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn order(stage: WorkflowStage, price: &str) -> OrderFacts {
        OrderFacts {
            workflow_stage: stage,
            total_price: dec(price),
        }
    }

    fn demand(version_id: Uuid, name: &str, qty: i32, stage: WorkflowStage) -> DemandLine {
        DemandLine {
            product_version_id: version_id,
            product_name: name.to_string(),
            quantity: qty,
            workflow_stage: stage,
        }
    }

    fn material(name: &str, stock_level: i32, threshold: i32) -> Material {
        Material {
            id: Uuid::new_v4(),
            workshop_id: Uuid::new_v4(),
            name: name.to_string(),
            category: MaterialCategory::Leather,
            unit_of_measure: "sqft".to_string(),
            stock_level,
            stock_alert_threshold: threshold,
            unit_cost: Decimal::ONE,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_workshop_yields_zeroed_snapshot() {
        let snapshot = aggregate_kpis(&[], &[], &[]);
        assert_eq!(snapshot.total_revenue, 0.0);
        assert_eq!(snapshot.orders_in_progress, 0);
        assert_eq!(snapshot.stock_alerts_count, 0);
        assert!(snapshot.stock_alert_items.is_empty());
        assert!(snapshot.top_products.is_empty());
    }

    #[test]
    fn test_revenue_counts_shipped_only() {
        let orders = vec![
            order(WorkflowStage::Shipped, "85.00"),
            order(WorkflowStage::Shipped, "42.50"),
            order(WorkflowStage::Packing, "1000.00"),
            order(WorkflowStage::Pending, "9.99"),
        ];
        let snapshot = aggregate_kpis(&orders, &[], &[]);
        assert_eq!(snapshot.total_revenue, 127.5);
    }

    #[test]
    fn test_orders_in_progress_excludes_pending_and_shipped() {
        let orders = vec![
            order(WorkflowStage::Pending, "10.00"),
            order(WorkflowStage::Cutting, "10.00"),
            order(WorkflowStage::Skiving, "10.00"),
            order(WorkflowStage::Stitching, "10.00"),
            order(WorkflowStage::Finishing, "10.00"),
            order(WorkflowStage::Packing, "10.00"),
            order(WorkflowStage::Shipped, "10.00"),
        ];
        let snapshot = aggregate_kpis(&orders, &[], &[]);
        assert_eq!(snapshot.orders_in_progress, 5);
    }

    #[test]
    fn test_stock_alerts_strict_threshold() {
        let materials = vec![
            material("low", 5, 10),
            material("at threshold", 10, 10),
            material("disabled", 0, 0),
        ];
        let snapshot = aggregate_kpis(&[], &[], &materials);
        assert_eq!(snapshot.stock_alerts_count, 1);
        assert_eq!(snapshot.stock_alert_items[0].name, "low");
    }

    #[test]
    fn test_top_products_excludes_pending_demand() {
        let wallet = Uuid::new_v4();
        let belt = Uuid::new_v4();
        let lines = vec![
            demand(wallet, "Wallet", 3, WorkflowStage::Shipped),
            demand(wallet, "Wallet", 2, WorkflowStage::Cutting),
            demand(belt, "Belt", 100, WorkflowStage::Pending),
            demand(belt, "Belt", 4, WorkflowStage::Shipped),
        ];
        let snapshot = aggregate_kpis(&[], &lines, &[]);
        assert_eq!(
            snapshot.top_products,
            vec![
                TopProduct {
                    product_name: "Wallet".to_string(),
                    quantity_sold: 5
                },
                TopProduct {
                    product_name: "Belt".to_string(),
                    quantity_sold: 4
                },
            ]
        );
    }

    #[test]
    fn test_top_products_caps_at_five() {
        let lines: Vec<DemandLine> = (0..8)
            .map(|i| {
                demand(
                    Uuid::new_v4(),
                    &format!("Product {i}"),
                    10 - i,
                    WorkflowStage::Shipped,
                )
            })
            .collect();
        let snapshot = aggregate_kpis(&[], &lines, &[]);
        assert_eq!(snapshot.top_products.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(snapshot.top_products[0].product_name, "Product 0");
    }

    #[test]
    fn test_top_products_tie_keeps_input_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let lines = vec![
            demand(first, "First", 4, WorkflowStage::Shipped),
            demand(second, "Second", 4, WorkflowStage::Shipped),
        ];
        let snapshot = aggregate_kpis(&[], &lines, &[]);
        assert_eq!(snapshot.top_products[0].product_name, "First");
        assert_eq!(snapshot.top_products[1].product_name, "Second");
    }
}
