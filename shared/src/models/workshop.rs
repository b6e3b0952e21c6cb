//! Workshop, settings and customer models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant workshop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workshop {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Per-workshop costing settings, one row per tenant. Created with defaults
/// when the workshop is created and changed only through explicit settings
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkshopSettings {
    pub workshop_id: Uuid,
    /// Money per hour of labor
    pub labor_rate: Decimal,
    /// Percentage markup applied to labor cost
    pub overhead_rate: Decimal,
    /// ISO 4217 code, 3 uppercase letters
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Default labor rate for a freshly created workshop, money per hour
pub const DEFAULT_LABOR_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Default overhead percentage for a freshly created workshop
pub const DEFAULT_OVERHEAD_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Default currency for a freshly created workshop
pub const DEFAULT_CURRENCY: &str = "USD";

/// A customer of a workshop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
