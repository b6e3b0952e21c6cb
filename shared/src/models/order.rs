//! Order and production workflow models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub customer_id: Uuid,
    /// Human-readable, unique per workshop, e.g. "WOS-1001"
    pub order_number: String,
    pub workflow_stage: WorkflowStage,
    /// Derived once at creation from item prices x quantities; never
    /// recomputed when product prices change later
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A line on an order. The product version id pins a specific BOM/routing
/// snapshot, which keeps historical costing reproducible after the product
/// is revised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_version_id: Uuid,
    pub quantity: i32,
    /// Captured at order time, decoupled from the product's current price
    pub unit_price: Decimal,
}

/// Production workflow stages, in canonical pipeline order.
///
/// PENDING is the only initial stage and SHIPPED is terminal, but transitions
/// are deliberately unrestricted: any stage can be set from any other,
/// including backward, so mis-staged orders can be corrected by hand. The only
/// rejected input is a literal that is not one of these seven.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStage {
    Pending,
    Cutting,
    Skiving,
    Stitching,
    Finishing,
    Packing,
    Shipped,
}

impl WorkflowStage {
    /// All stages in pipeline order
    pub const ALL: [WorkflowStage; 7] = [
        WorkflowStage::Pending,
        WorkflowStage::Cutting,
        WorkflowStage::Skiving,
        WorkflowStage::Stitching,
        WorkflowStage::Finishing,
        WorkflowStage::Packing,
        WorkflowStage::Shipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStage::Pending => "PENDING",
            WorkflowStage::Cutting => "CUTTING",
            WorkflowStage::Skiving => "SKIVING",
            WorkflowStage::Stitching => "STITCHING",
            WorkflowStage::Finishing => "FINISHING",
            WorkflowStage::Packing => "PACKING",
            WorkflowStage::Shipped => "SHIPPED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(WorkflowStage::Pending),
            "CUTTING" => Some(WorkflowStage::Cutting),
            "SKIVING" => Some(WorkflowStage::Skiving),
            "STITCHING" => Some(WorkflowStage::Stitching),
            "FINISHING" => Some(WorkflowStage::Finishing),
            "PACKING" => Some(WorkflowStage::Packing),
            "SHIPPED" => Some(WorkflowStage::Shipped),
            _ => None,
        }
    }

    /// Actively being worked: excludes the queue (PENDING) and the done
    /// pile (SHIPPED)
    pub fn is_in_production(&self) -> bool {
        matches!(
            self,
            WorkflowStage::Cutting
                | WorkflowStage::Skiving
                | WorkflowStage::Stitching
                | WorkflowStage::Finishing
                | WorkflowStage::Packing
        )
    }

    /// Only shipped orders count toward revenue
    pub fn counts_as_revenue(&self) -> bool {
        matches!(self, WorkflowStage::Shipped)
    }

    /// Confirmed demand: anything past the PENDING queue, in flight or shipped
    pub fn counts_as_demand(&self) -> bool {
        !matches!(self, WorkflowStage::Pending)
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prefix for human-readable order numbers
pub const ORDER_NUMBER_PREFIX: &str = "WOS-";

/// Sequence value used when a workshop has no orders yet; the first order
/// becomes WOS-1001.
pub const ORDER_NUMBER_SEED: u32 = 1000;

/// Compute the next order number from the most recent one in the workshop.
/// Falls back to the seed when there is no previous order or its suffix does
/// not parse.
pub fn next_order_number(last: Option<&str>) -> String {
    let last_seq = last
        .and_then(|n| n.rsplit('-').next())
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .unwrap_or(ORDER_NUMBER_SEED);
    format!("{}{}", ORDER_NUMBER_PREFIX, last_seq + 1)
}

/// Total price of an order at creation time: sum of unit price x quantity
/// over its items, in full fixed-point precision.
pub fn order_total_price(items: &[(Decimal, i32)]) -> Decimal {
    items
        .iter()
        .map(|(unit_price, quantity)| *unit_price * Decimal::from(*quantity))
        .sum()
}
