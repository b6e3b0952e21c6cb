//! Workshop costing settings

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_currency_code, validate_rates, WorkshopSettings};

/// Settings service: one labor/overhead/currency row per workshop
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    workshop_id: Uuid,
    labor_rate: Decimal,
    overhead_rate: Decimal,
    currency: String,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for WorkshopSettings {
    fn from(row: SettingsRow) -> Self {
        WorkshopSettings {
            workshop_id: row.workshop_id,
            labor_rate: row.labor_rate,
            overhead_rate: row.overhead_rate,
            // CHAR(3) columns come back space padded on some drivers
            currency: row.currency.trim().to_string(),
            updated_at: row.updated_at,
        }
    }
}

/// Input for updating workshop settings
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsInput {
    pub labor_rate: Decimal,
    pub overhead_rate: Decimal,
    pub currency: String,
}

impl SettingsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the workshop's settings. A missing row is an onboarding gap, not
    /// a bad reference, so it surfaces as Unconfigured rather than NotFound.
    pub async fn get(&self, workshop_id: Uuid) -> AppResult<WorkshopSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT workshop_id, labor_rate, overhead_rate, currency, updated_at
            FROM workshop_settings
            WHERE workshop_id = $1
            "#,
        )
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::Unconfigured("Workshop settings have not been configured".to_string())
        })?;

        Ok(row.into())
    }

    /// Update the workshop's settings
    pub async fn update(
        &self,
        workshop_id: Uuid,
        input: UpdateSettingsInput,
    ) -> AppResult<WorkshopSettings> {
        validate_rates(input.labor_rate, input.overhead_rate).map_err(|msg| {
            AppError::Validation {
                field: "labor_rate".to_string(),
                message: msg.to_string(),
            }
        })?;

        let currency = input.currency.to_uppercase();
        validate_currency_code(&currency).map_err(|msg| AppError::Validation {
            field: "currency".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            UPDATE workshop_settings
            SET labor_rate = $2, overhead_rate = $3, currency = $4, updated_at = now()
            WHERE workshop_id = $1
            RETURNING workshop_id, labor_rate, overhead_rate, currency, updated_at
            "#,
        )
        .bind(workshop_id)
        .bind(input.labor_rate)
        .bind(input.overhead_rate)
        .bind(&currency)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::Unconfigured("Workshop settings have not been configured".to_string())
        })?;

        Ok(row.into())
    }
}
