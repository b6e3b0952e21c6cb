//! Customer directory

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::Customer;

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    workshop_id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            workshop_id: row.workshop_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a customer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl CustomerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List customers in the workshop, ordered by name
    pub async fn list(&self, workshop_id: Uuid) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, workshop_id, name, email, phone, address, notes, created_at
            FROM customers
            WHERE workshop_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get one customer within the workshop scope
    pub async fn get(&self, workshop_id: Uuid, customer_id: Uuid) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, workshop_id, name, email, phone, address, notes, created_at
            FROM customers
            WHERE id = $1 AND workshop_id = $2
            "#,
        )
        .bind(customer_id)
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        Ok(row.into())
    }

    /// Create a customer
    pub async fn create(
        &self,
        workshop_id: Uuid,
        input: CreateCustomerInput,
    ) -> AppResult<Customer> {
        input.validate()?;

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (workshop_id, name, email, phone, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, workshop_id, name, email, phone, address, notes, created_at
            "#,
        )
        .bind(workshop_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
