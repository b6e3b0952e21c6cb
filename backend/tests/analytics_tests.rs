//! Dashboard KPI aggregation scenarios

use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::{
    aggregate_kpis, DemandLine, Material, MaterialCategory, OrderFacts, WorkflowStage,
    TOP_PRODUCTS_LIMIT,
};

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

/// A realistic dashboard load: mixed stages, some low stock, a clear top
/// seller. Checks every KPI from one input set.
#[test]
fn test_full_dashboard_snapshot() {
    let wallet = Uuid::new_v4();
    let belt = Uuid::new_v4();
    let tote = Uuid::new_v4();

    let orders = vec![
        order(WorkflowStage::Shipped, "85.00"),
        order(WorkflowStage::Shipped, "170.00"),
        order(WorkflowStage::Stitching, "85.00"),
        order(WorkflowStage::Cutting, "45.00"),
        order(WorkflowStage::Pending, "300.00"),
    ];
    let lines = vec![
        demand(wallet, "Bifold Wallet", 1, WorkflowStage::Shipped),
        demand(wallet, "Bifold Wallet", 2, WorkflowStage::Shipped),
        demand(wallet, "Bifold Wallet", 1, WorkflowStage::Stitching),
        demand(belt, "Classic Belt", 1, WorkflowStage::Cutting),
        demand(tote, "Tote Bag", 10, WorkflowStage::Pending),
    ];
    let materials = vec![
        material("Veg-tan leather", 3, 10),
        material("Tiger thread", 50, 10),
        material("Brass buckles", 0, 0),
    ];

    let snapshot = aggregate_kpis(&orders, &lines, &materials);

    assert_eq!(snapshot.total_revenue, 255.0);
    assert_eq!(snapshot.orders_in_progress, 2);
    assert_eq!(snapshot.stock_alerts_count, 1);
    assert_eq!(snapshot.stock_alert_items[0].name, "Veg-tan leather");
    // The pending tote demand never counts, so the wallet leads
    assert_eq!(snapshot.top_products[0].product_name, "Bifold Wallet");
    assert_eq!(snapshot.top_products[0].quantity_sold, 4);
    assert_eq!(snapshot.top_products[1].product_name, "Classic Belt");
    assert_eq!(snapshot.top_products.len(), 2);
}

/// Revenue follows the order's current stage, so an order moved out of
/// SHIPPED stops counting and one moved back in counts again.
#[test]
fn test_revenue_tracks_current_stage_only() {
    let shipped = vec![order(WorkflowStage::Shipped, "85.00")];
    assert_eq!(aggregate_kpis(&shipped, &[], &[]).total_revenue, 85.0);

    // Same order pulled back to PENDING for a rework
    let reworked = vec![order(WorkflowStage::Pending, "85.00")];
    assert_eq!(aggregate_kpis(&reworked, &[], &[]).total_revenue, 0.0);
}

#[test]
fn test_stock_alert_threshold_is_strict() {
    // At the threshold is fine; one below trips the alert; zero threshold
    // disables alerts even at zero stock
    let materials = vec![
        material("at", 10, 10),
        material("below", 9, 10),
        material("disabled", 0, 0),
    ];
    let snapshot = aggregate_kpis(&[], &[], &materials);
    assert_eq!(snapshot.stock_alerts_count, 1);
    assert_eq!(snapshot.stock_alert_items[0].name, "below");
}

#[test]
fn test_top_products_cap_and_ordering() {
    let mut lines = Vec::new();
    for i in 0..7 {
        lines.push(demand(
            Uuid::new_v4(),
            &format!("Product {i}"),
            100 - i,
            WorkflowStage::Shipped,
        ));
    }
    let snapshot = aggregate_kpis(&[], &lines, &[]);

    assert_eq!(snapshot.top_products.len(), TOP_PRODUCTS_LIMIT);
    assert_eq!(snapshot.top_products[0].product_name, "Product 0");
    assert_eq!(snapshot.top_products[4].product_name, "Product 4");
}

#[test]
fn test_same_product_different_versions_rank_separately() {
    // Demand is keyed by product version, so a revision starts a fresh count
    let v1 = Uuid::new_v4();
    let v2 = Uuid::new_v4();
    let lines = vec![
        demand(v1, "Bifold Wallet", 3, WorkflowStage::Shipped),
        demand(v2, "Bifold Wallet", 2, WorkflowStage::Shipped),
    ];
    let snapshot = aggregate_kpis(&[], &lines, &[]);
    assert_eq!(snapshot.top_products.len(), 2);
    assert_eq!(snapshot.top_products[0].quantity_sold, 3);
    assert_eq!(snapshot.top_products[1].quantity_sold, 2);
}
