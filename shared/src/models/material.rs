//! Material and stock models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw material tracked by a workshop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
    pub category: MaterialCategory,
    /// Purchasing/consumption unit, e.g. "sqft" or "meter"
    pub unit_of_measure: String,
    pub stock_level: i32,
    /// Alert fires while stock is strictly below this; 0 disables the alert
    pub stock_alert_threshold: i32,
    pub unit_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Low-stock check used by the analytics aggregator. A threshold of zero
    /// means the material opted out of alerting; the comparison is strict.
    pub fn is_low_stock(&self) -> bool {
        self.stock_alert_threshold > 0 && self.stock_level < self.stock_alert_threshold
    }
}

/// Material categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialCategory {
    Leather,
    Thread,
    Hardware,
    Packaging,
    Tools,
    Consumable,
    Other,
}

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Leather => "LEATHER",
            MaterialCategory::Thread => "THREAD",
            MaterialCategory::Hardware => "HARDWARE",
            MaterialCategory::Packaging => "PACKAGING",
            MaterialCategory::Tools => "TOOLS",
            MaterialCategory::Consumable => "CONSUMABLE",
            MaterialCategory::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LEATHER" => Some(MaterialCategory::Leather),
            "THREAD" => Some(MaterialCategory::Thread),
            "HARDWARE" => Some(MaterialCategory::Hardware),
            "PACKAGING" => Some(MaterialCategory::Packaging),
            "TOOLS" => Some(MaterialCategory::Tools),
            "CONSUMABLE" => Some(MaterialCategory::Consumable),
            "OTHER" => Some(MaterialCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
