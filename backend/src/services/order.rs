//! Orders and the production workflow
//!
//! Orders are numbered sequentially per workshop ("WOS-1001", ...) and move
//! through the production stages as a free-form board: any stage can be set
//! at any time, including backward. Only unknown stage names are rejected.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    next_order_number, order_total_price, validate_order_item, Order, OrderItem, WorkflowStage,
};

/// Order service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    workshop_id: Uuid,
    customer_id: Uuid,
    order_number: String,
    workflow_stage: String,
    total_price: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> AppResult<Order> {
        let stage = WorkflowStage::parse(&self.workflow_stage).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown workflow stage in database: {}",
                self.workflow_stage
            ))
        })?;
        Ok(Order {
            id: self.id,
            workshop_id: self.workshop_id,
            customer_id: self.customer_id,
            order_number: self.order_number,
            workflow_stage: stage,
            total_price: self.total_price,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    product_version_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            product_version_id: row.product_version_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Input for one order line
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub product_version_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub notes: Option<String>,
    pub items: Vec<OrderItemInput>,
}

/// Input for moving an order to another stage
#[derive(Debug, Deserialize)]
pub struct UpdateStageInput {
    pub workflow_stage: String,
}

/// Order with its line items
#[derive(Debug, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List orders in the workshop, newest first
    pub async fn list(&self, workshop_id: Uuid) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, workshop_id, customer_id, order_number, workflow_stage,
                   total_price, notes, created_at
            FROM orders
            WHERE workshop_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_order()).collect()
    }

    /// Get one order with its line items
    pub async fn get(&self, workshop_id: Uuid, order_id: Uuid) -> AppResult<OrderDetails> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, workshop_id, customer_id, order_number, workflow_stage,
                   total_price, notes, created_at
            FROM orders
            WHERE id = $1 AND workshop_id = $2
            "#,
        )
        .bind(order_id)
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, product_version_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderDetails {
            order: row.into_order()?,
            items: items.into_iter().map(|i| i.into()).collect(),
        })
    }

    /// Create an order in PENDING. The order number continues the workshop's
    /// sequence and the total is the sum of line prices, frozen at creation.
    pub async fn create(
        &self,
        workshop_id: Uuid,
        input: CreateOrderInput,
    ) -> AppResult<OrderDetails> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "An order needs at least one item".to_string(),
            });
        }
        for item in &input.items {
            validate_order_item(item.quantity, item.unit_price).map_err(|msg| {
                AppError::Validation {
                    field: "items".to_string(),
                    message: msg.to_string(),
                }
            })?;
        }

        let customer_exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM customers WHERE id = $1 AND workshop_id = $2")
                .bind(input.customer_id)
                .bind(workshop_id)
                .fetch_optional(&self.db)
                .await?;
        if customer_exists.is_none() {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let last: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT order_number FROM orders
            WHERE workshop_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(workshop_id)
        .fetch_optional(&mut *tx)
        .await?;
        let order_number = next_order_number(last.as_ref().map(|(n,)| n.as_str()));

        let total_price = order_total_price(
            &input
                .items
                .iter()
                .map(|i| (i.unit_price, i.quantity))
                .collect::<Vec<_>>(),
        );

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                workshop_id, customer_id, order_number, workflow_stage, total_price, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, workshop_id, customer_id, order_number, workflow_stage,
                      total_price, notes, created_at
            "#,
        )
        .bind(workshop_id)
        .bind(input.customer_id)
        .bind(&order_number)
        .bind(WorkflowStage::Pending.as_str())
        .bind(total_price)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r#"
                INSERT INTO order_items (order_id, product_version_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_version_id, quantity, unit_price
                "#,
            )
            .bind(row.id)
            .bind(item.product_version_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item_row.into());
        }

        tx.commit().await?;

        tracing::info!("Created order {} ({})", order_number, row.id);
        Ok(OrderDetails {
            order: row.into_order()?,
            items,
        })
    }

    /// Move an order to another workflow stage
    pub async fn update_stage(
        &self,
        workshop_id: Uuid,
        order_id: Uuid,
        input: UpdateStageInput,
    ) -> AppResult<Order> {
        let stage = WorkflowStage::parse(&input.workflow_stage).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown workflow stage: {}", input.workflow_stage))
        })?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET workflow_stage = $3
            WHERE id = $1 AND workshop_id = $2
            RETURNING id, workshop_id, customer_id, order_number, workflow_stage,
                      total_price, notes, created_at
            "#,
        )
        .bind(order_id)
        .bind(workshop_id)
        .bind(stage.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        tracing::info!("Order {} moved to {}", row.order_number, stage);
        row.into_order()
    }
}
