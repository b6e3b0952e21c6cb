//! Workshop (tenant) management

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{Workshop, DEFAULT_CURRENCY, DEFAULT_LABOR_RATE, DEFAULT_OVERHEAD_RATE};

/// Workshop service
#[derive(Clone)]
pub struct WorkshopService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct WorkshopRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<WorkshopRow> for Workshop {
    fn from(row: WorkshopRow) -> Self {
        Workshop {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a workshop
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkshopInput {
    #[validate(length(min = 1, message = "Workshop name is required"))]
    pub name: String,
}

impl WorkshopService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a workshop together with its default settings row, so costing
    /// works out of the box.
    pub async fn create(&self, input: CreateWorkshopInput) -> AppResult<Workshop> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, WorkshopRow>(
            "INSERT INTO workshops (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO workshop_settings (workshop_id, labor_rate, overhead_rate, currency)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(row.id)
        .bind(DEFAULT_LABOR_RATE)
        .bind(DEFAULT_OVERHEAD_RATE)
        .bind(DEFAULT_CURRENCY)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Created workshop {} ({})", row.name, row.id);
        Ok(row.into())
    }

    /// List all workshops
    pub async fn list(&self) -> AppResult<Vec<Workshop>> {
        let rows = sqlx::query_as::<_, WorkshopRow>(
            "SELECT id, name, created_at FROM workshops ORDER BY created_at ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get one workshop by id
    pub async fn get(&self, workshop_id: Uuid) -> AppResult<Workshop> {
        let row = sqlx::query_as::<_, WorkshopRow>(
            "SELECT id, name, created_at FROM workshops WHERE id = $1",
        )
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop".to_string()))?;

        Ok(row.into())
    }
}
