//! Material catalog and stock levels

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    validate_stock_fields, validate_unit_cost, Material, MaterialCategory,
};

/// Material service for the workshop's raw material catalog
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Database row for a material
#[derive(Debug, sqlx::FromRow)]
struct MaterialRow {
    id: Uuid,
    workshop_id: Uuid,
    name: String,
    category: String,
    unit_of_measure: String,
    stock_level: i32,
    stock_alert_threshold: i32,
    unit_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Material {
            id: row.id,
            workshop_id: row.workshop_id,
            name: row.name,
            category: MaterialCategory::parse(&row.category).unwrap_or(MaterialCategory::Other),
            unit_of_measure: row.unit_of_measure,
            stock_level: row.stock_level,
            stock_alert_threshold: row.stock_alert_threshold,
            unit_cost: row.unit_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating or updating a material
#[derive(Debug, Deserialize, Validate)]
pub struct MaterialInput {
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    pub category: MaterialCategory,
    #[validate(length(min = 1, message = "Unit of measure is required"))]
    pub unit_of_measure: String,
    #[serde(default)]
    pub stock_level: i32,
    #[serde(default)]
    pub stock_alert_threshold: i32,
    pub unit_cost: Decimal,
}

const MATERIAL_COLUMNS: &str = "id, workshop_id, name, category, unit_of_measure, \
     stock_level, stock_alert_threshold, unit_cost, created_at, updated_at";

impl MaterialService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all materials in the workshop, ordered by name
    pub async fn list(&self, workshop_id: Uuid) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE workshop_id = $1 ORDER BY name ASC",
        ))
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get one material by id within the workshop scope
    pub async fn get(&self, workshop_id: Uuid, material_id: Uuid) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1 AND workshop_id = $2",
        ))
        .bind(material_id)
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(row.into())
    }

    /// Create a material
    pub async fn create(&self, workshop_id: Uuid, input: MaterialInput) -> AppResult<Material> {
        self.validate_input(&input)?;

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            INSERT INTO materials (
                workshop_id, name, category, unit_of_measure,
                stock_level, stock_alert_threshold, unit_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(workshop_id)
        .bind(&input.name)
        .bind(input.category.as_str())
        .bind(&input.unit_of_measure)
        .bind(input.stock_level)
        .bind(input.stock_alert_threshold)
        .bind(input.unit_cost)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a material in place
    pub async fn update(
        &self,
        workshop_id: Uuid,
        material_id: Uuid,
        input: MaterialInput,
    ) -> AppResult<Material> {
        self.validate_input(&input)?;

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            UPDATE materials
            SET name = $3, category = $4, unit_of_measure = $5,
                stock_level = $6, stock_alert_threshold = $7, unit_cost = $8,
                updated_at = now()
            WHERE id = $1 AND workshop_id = $2
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(material_id)
        .bind(workshop_id)
        .bind(&input.name)
        .bind(input.category.as_str())
        .bind(&input.unit_of_measure)
        .bind(input.stock_level)
        .bind(input.stock_alert_threshold)
        .bind(input.unit_cost)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(row.into())
    }

    /// Delete a material
    pub async fn delete(&self, workshop_id: Uuid, material_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1 AND workshop_id = $2")
            .bind(material_id)
            .bind(workshop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }
        Ok(())
    }

    fn validate_input(&self, input: &MaterialInput) -> AppResult<()> {
        input.validate()?;

        validate_stock_fields(input.stock_level, input.stock_alert_threshold).map_err(|msg| {
            AppError::Validation {
                field: "stock_level".to_string(),
                message: msg.to_string(),
            }
        })?;

        validate_unit_cost(input.unit_cost).map_err(|msg| AppError::Validation {
            field: "unit_cost".to_string(),
            message: msg.to_string(),
        })?;

        Ok(())
    }
}
