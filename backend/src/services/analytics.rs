//! Workshop dashboard analytics
//!
//! Loads the raw order, demand and stock rows for a workshop and hands them
//! to the pure aggregation in `shared::analytics`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    aggregate_kpis, DemandLine, KpiSnapshot, Material, MaterialCategory, OrderFacts, WorkflowStage,
};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderFactsRow {
    workflow_stage: String,
    total_price: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct DemandRow {
    product_version_id: Uuid,
    product_name: String,
    quantity: i32,
    workflow_stage: String,
}

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

impl AnalyticsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute the KPI snapshot for a workshop dashboard
    pub async fn get_kpis(&self, workshop_id: Uuid) -> AppResult<KpiSnapshot> {
        let order_rows = sqlx::query_as::<_, OrderFactsRow>(
            "SELECT workflow_stage, total_price FROM orders WHERE workshop_id = $1",
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        let demand_rows = sqlx::query_as::<_, DemandRow>(
            r#"
            SELECT oi.product_version_id, p.name AS product_name, oi.quantity,
                   o.workflow_stage
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN product_versions pv ON pv.id = oi.product_version_id
            JOIN products p ON p.id = pv.product_id
            WHERE o.workshop_id = $1
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        let material_rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, workshop_id, name, category, unit_of_measure,
                   stock_level, stock_alert_threshold, unit_cost, created_at, updated_at
            FROM materials
            WHERE workshop_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        let orders = order_rows
            .into_iter()
            .map(|r| {
                Ok(OrderFacts {
                    workflow_stage: parse_stage(&r.workflow_stage)?,
                    total_price: r.total_price,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let demand = demand_rows
            .into_iter()
            .map(|r| {
                Ok(DemandLine {
                    product_version_id: r.product_version_id,
                    product_name: r.product_name,
                    quantity: r.quantity,
                    workflow_stage: parse_stage(&r.workflow_stage)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let materials = material_rows
            .into_iter()
            .map(|r| {
                let category = MaterialCategory::parse(&r.category).ok_or_else(|| {
                    AppError::Internal(format!("Unknown material category in database: {}", r.category))
                })?;
                Ok(Material {
                    id: r.id,
                    workshop_id: r.workshop_id,
                    name: r.name,
                    category,
                    unit_of_measure: r.unit_of_measure,
                    stock_level: r.stock_level,
                    stock_alert_threshold: r.stock_alert_threshold,
                    unit_cost: r.unit_cost,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(aggregate_kpis(&orders, &demand, &materials))
    }
}

fn parse_stage(raw: &str) -> AppResult<WorkflowStage> {
    WorkflowStage::parse(raw)
        .ok_or_else(|| AppError::Internal(format!("Unknown workflow stage in database: {raw}")))
}
