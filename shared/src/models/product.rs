//! Product, version, BOM and routing models
//!
//! Product formulations are versioned append-only: editing a product's BOM or
//! routing creates a new `ProductVersion` with the next version number rather
//! than mutating history. Orders reference a specific version, so the cost of
//! a past order stays reproducible after the product is revised.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub selling_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One immutable snapshot of a product's formulation. The current version is
/// the one with the highest version number; numbers are never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVersion {
    pub id: Uuid,
    pub product_id: Uuid,
    pub version: i32,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A bill-of-materials line, owned by exactly one product version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomItem {
    pub id: Uuid,
    pub product_version_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    /// Expected waste as a fraction in [0, 1]
    pub scrap_factor: Decimal,
}

/// An ordered labor step, owned by exactly one product version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingStep {
    pub id: Uuid,
    pub product_version_id: Uuid,
    /// Positive and unique within a version
    pub step_number: i32,
    pub operation_id: Uuid,
    pub tool_id: Option<Uuid>,
    pub estimated_time_min: i32,
}

/// A named labor activity from the workshop's operations library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
}

/// A tool that a routing step may call for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
}

/// BOM line with its material resolved, as the costing engine consumes it
#[derive(Debug, Clone, Serialize)]
pub struct BomLine {
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub scrap_factor: Decimal,
    pub unit_cost: Decimal,
}

/// Routing step with its operation resolved
#[derive(Debug, Clone, Serialize)]
pub struct RoutingLine {
    pub step_number: i32,
    pub operation_name: String,
    pub tool_name: Option<String>,
    pub estimated_time_min: i32,
}

/// A product version with everything the costing engine needs
#[derive(Debug, Clone, Serialize)]
pub struct ProductVersionDetails {
    pub id: Uuid,
    pub product_id: Uuid,
    pub version: i32,
    pub bom: Vec<BomLine>,
    pub routing: Vec<RoutingLine>,
}

impl ProductVersionDetails {
    /// Labor minutes derived from routing. The routing list is the single
    /// source of truth; there is no cached minutes field to drift from it.
    pub fn total_routing_minutes(&self) -> i64 {
        self.routing
            .iter()
            .map(|step| i64::from(step.estimated_time_min))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_routing_minutes() {
        let details = ProductVersionDetails {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            version: 1,
            bom: vec![],
            routing: vec![
                RoutingLine {
                    step_number: 1,
                    operation_name: "Cut Leather".to_string(),
                    tool_name: None,
                    estimated_time_min: 20,
                },
                RoutingLine {
                    step_number: 2,
                    operation_name: "Saddle Stitch".to_string(),
                    tool_name: None,
                    estimated_time_min: 40,
                },
            ],
        };
        assert_eq!(details.total_routing_minutes(), 60);
    }

    #[test]
    fn test_empty_routing_is_zero_minutes() {
        let details = ProductVersionDetails {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            version: 1,
            bom: vec![],
            routing: vec![],
        };
        assert_eq!(details.total_routing_minutes(), 0);
    }
}
