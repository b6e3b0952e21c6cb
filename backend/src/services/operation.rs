//! Operations and tools library
//!
//! Routing steps reference named labor activities (operations) and,
//! optionally, tools. Both are simple per-workshop lookup lists.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use shared::{Operation, Tool};

/// Operation and tool library service
#[derive(Clone)]
pub struct OperationService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct NamedRow {
    id: Uuid,
    workshop_id: Uuid,
    name: String,
}

/// Input for creating an operation or a tool
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNamedInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

impl OperationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List operations in the workshop, ordered by name
    pub async fn list_operations(&self, workshop_id: Uuid) -> AppResult<Vec<Operation>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, workshop_id, name FROM operations WHERE workshop_id = $1 ORDER BY name ASC",
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Operation {
                id: r.id,
                workshop_id: r.workshop_id,
                name: r.name,
            })
            .collect())
    }

    /// Create an operation
    pub async fn create_operation(
        &self,
        workshop_id: Uuid,
        input: CreateNamedInput,
    ) -> AppResult<Operation> {
        input.validate()?;

        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO operations (workshop_id, name) VALUES ($1, $2) RETURNING id, workshop_id, name",
        )
        .bind(workshop_id)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        Ok(Operation {
            id: row.id,
            workshop_id: row.workshop_id,
            name: row.name,
        })
    }

    /// List tools in the workshop, ordered by name
    pub async fn list_tools(&self, workshop_id: Uuid) -> AppResult<Vec<Tool>> {
        let rows = sqlx::query_as::<_, NamedRow>(
            "SELECT id, workshop_id, name FROM tools WHERE workshop_id = $1 ORDER BY name ASC",
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Tool {
                id: r.id,
                workshop_id: r.workshop_id,
                name: r.name,
            })
            .collect())
    }

    /// Create a tool
    pub async fn create_tool(&self, workshop_id: Uuid, input: CreateNamedInput) -> AppResult<Tool> {
        input.validate()?;

        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO tools (workshop_id, name) VALUES ($1, $2) RETURNING id, workshop_id, name",
        )
        .bind(workshop_id)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        Ok(Tool {
            id: row.id,
            workshop_id: row.workshop_id,
            name: row.name,
        })
    }
}
