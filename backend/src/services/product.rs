//! Products, versioned formulations and costing
//!
//! A product's BOM and routing live on immutable `product_versions` rows.
//! Revisions append the next version number; nothing is edited in place, so
//! orders that pinned an old version still cost out the same way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    calculate_margin, calculate_product_cost, money, validate_bom_item, validate_routing_step,
    validate_selling_price, BomLine, CostRates, CostSummary, MarginSummary, Product,
    ProductVersion, ProductVersionDetails, RoutingLine,
};

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    workshop_id: Uuid,
    name: String,
    sku: Option<String>,
    description: Option<String>,
    selling_price: Decimal,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            workshop_id: row.workshop_id,
            name: row.name,
            sku: row.sku,
            description: row.description,
            selling_price: row.selling_price,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VersionRow {
    id: Uuid,
    product_id: Uuid,
    version: i32,
    notes: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<VersionRow> for ProductVersion {
    fn from(row: VersionRow) -> Self {
        ProductVersion {
            id: row.id,
            product_id: row.product_id,
            version: row.version,
            notes: row.notes,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// Input for one BOM line
#[derive(Debug, Deserialize)]
pub struct BomItemInput {
    pub material_id: Uuid,
    pub quantity: Decimal,
    #[serde(default)]
    pub scrap_factor: Decimal,
}

/// Input for one routing step
#[derive(Debug, Deserialize)]
pub struct RoutingStepInput {
    pub step_number: i32,
    pub operation_id: Uuid,
    pub tool_id: Option<Uuid>,
    pub estimated_time_min: i32,
}

/// Input for a product version (initial or appended)
#[derive(Debug, Deserialize)]
pub struct CreateVersionInput {
    pub notes: Option<String>,
    pub bom_items: Vec<BomItemInput>,
    pub routing: Vec<RoutingStepInput>,
}

/// Input for creating a product together with its first version
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub selling_price: Decimal,
    pub version: CreateVersionInput,
}

/// Product with its current (highest) version number, for list views
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    pub current_version: i32,
}

/// Product with its full version history, newest first
#[derive(Debug, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub versions: Vec<ProductVersion>,
}

/// Costing report for one product version: the cost rollup plus the margin
/// against the product's current selling price. All numbers are plain floats
/// rounded for display; the computation itself runs in fixed point.
#[derive(Debug, Serialize)]
pub struct CostingReport {
    #[serde(flatten)]
    pub cost: CostSummary,
    pub selling_price: f64,
    #[serde(flatten)]
    pub margin: MarginSummary,
    pub currency: String,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product and its version 1 in one transaction
    pub async fn create(&self, workshop_id: Uuid, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        validate_selling_price(input.selling_price).map_err(|msg| AppError::Validation {
            field: "selling_price".to_string(),
            message: msg.to_string(),
        })?;
        validate_version_input(&input.version)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (workshop_id, name, sku, description, selling_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, workshop_id, name, sku, description, selling_price, created_at
            "#,
        )
        .bind(workshop_id)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.description)
        .bind(input.selling_price)
        .fetch_one(&mut *tx)
        .await?;

        insert_version(&mut tx, row.id, 1, &input.version).await?;

        tx.commit().await?;

        tracing::info!("Created product {} ({})", row.name, row.id);
        Ok(row.into())
    }

    /// List products in the workshop with their current version number
    pub async fn list(&self, workshop_id: Uuid) -> AppResult<Vec<ProductSummary>> {
        #[derive(sqlx::FromRow)]
        struct SummaryRow {
            id: Uuid,
            workshop_id: Uuid,
            name: String,
            sku: Option<String>,
            description: Option<String>,
            selling_price: Decimal,
            created_at: DateTime<Utc>,
            current_version: i32,
        }

        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT p.id, p.workshop_id, p.name, p.sku, p.description, p.selling_price,
                   p.created_at, MAX(pv.version) AS current_version
            FROM products p
            JOIN product_versions pv ON pv.product_id = p.id
            WHERE p.workshop_id = $1
            GROUP BY p.id
            ORDER BY p.name ASC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductSummary {
                product: Product {
                    id: r.id,
                    workshop_id: r.workshop_id,
                    name: r.name,
                    sku: r.sku,
                    description: r.description,
                    selling_price: r.selling_price,
                    created_at: r.created_at,
                },
                current_version: r.current_version,
            })
            .collect())
    }

    /// Get one product with its version history, newest version first
    pub async fn get(&self, workshop_id: Uuid, product_id: Uuid) -> AppResult<ProductDetails> {
        let product = self.get_product_row(workshop_id, product_id).await?;

        let versions = sqlx::query_as::<_, VersionRow>(
            r#"
            SELECT id, product_id, version, notes, active, created_at
            FROM product_versions
            WHERE product_id = $1
            ORDER BY version DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductDetails {
            product: product.into(),
            versions: versions.into_iter().map(|v| v.into()).collect(),
        })
    }

    /// Append a new version to a product. Version numbers are monotonically
    /// increasing per product and never reused.
    pub async fn create_version(
        &self,
        workshop_id: Uuid,
        product_id: Uuid,
        input: CreateVersionInput,
    ) -> AppResult<ProductVersion> {
        validate_version_input(&input)?;
        self.get_product_row(workshop_id, product_id).await?;

        let mut tx = self.db.begin().await?;

        let (next_version,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM product_versions WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        let version = insert_version(&mut tx, product_id, next_version, &input).await?;

        tx.commit().await?;

        Ok(version)
    }

    /// Cost one product version under the workshop's rates and report the
    /// margin against the product's current selling price.
    pub async fn get_costing(
        &self,
        workshop_id: Uuid,
        product_version_id: Uuid,
    ) -> AppResult<CostingReport> {
        #[derive(sqlx::FromRow)]
        struct VersionScopeRow {
            id: Uuid,
            product_id: Uuid,
            version: i32,
            selling_price: Decimal,
        }

        let scope = sqlx::query_as::<_, VersionScopeRow>(
            r#"
            SELECT pv.id, pv.product_id, pv.version, p.selling_price
            FROM product_versions pv
            JOIN products p ON p.id = pv.product_id
            WHERE pv.id = $1 AND p.workshop_id = $2
            "#,
        )
        .bind(product_version_id)
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product version".to_string()))?;

        #[derive(sqlx::FromRow)]
        struct BomRow {
            material_id: Uuid,
            material_name: String,
            quantity: Decimal,
            scrap_factor: Decimal,
            unit_cost: Decimal,
        }

        let bom = sqlx::query_as::<_, BomRow>(
            r#"
            SELECT b.material_id, m.name AS material_name, b.quantity, b.scrap_factor,
                   m.unit_cost
            FROM bom_items b
            JOIN materials m ON m.id = b.material_id
            WHERE b.product_version_id = $1
            "#,
        )
        .bind(product_version_id)
        .fetch_all(&self.db)
        .await?;

        #[derive(sqlx::FromRow)]
        struct RoutingRow {
            step_number: i32,
            operation_name: String,
            tool_name: Option<String>,
            estimated_time_min: i32,
        }

        let routing = sqlx::query_as::<_, RoutingRow>(
            r#"
            SELECT r.step_number, o.name AS operation_name, t.name AS tool_name,
                   r.estimated_time_min
            FROM routing_steps r
            JOIN operations o ON o.id = r.operation_id
            LEFT JOIN tools t ON t.id = r.tool_id
            WHERE r.product_version_id = $1
            ORDER BY r.step_number ASC
            "#,
        )
        .bind(product_version_id)
        .fetch_all(&self.db)
        .await?;

        #[derive(sqlx::FromRow)]
        struct RatesRow {
            labor_rate: Decimal,
            overhead_rate: Decimal,
            currency: String,
        }

        let rates = sqlx::query_as::<_, RatesRow>(
            "SELECT labor_rate, overhead_rate, currency FROM workshop_settings WHERE workshop_id = $1",
        )
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::Unconfigured("Workshop settings have not been configured".to_string())
        })?;

        let details = ProductVersionDetails {
            id: scope.id,
            product_id: scope.product_id,
            version: scope.version,
            bom: bom
                .into_iter()
                .map(|b| BomLine {
                    material_id: b.material_id,
                    material_name: b.material_name,
                    quantity: b.quantity,
                    scrap_factor: b.scrap_factor,
                    unit_cost: b.unit_cost,
                })
                .collect(),
            routing: routing
                .into_iter()
                .map(|r| RoutingLine {
                    step_number: r.step_number,
                    operation_name: r.operation_name,
                    tool_name: r.tool_name,
                    estimated_time_min: r.estimated_time_min,
                })
                .collect(),
        };

        let breakdown = calculate_product_cost(
            &details,
            &CostRates {
                labor_rate: rates.labor_rate,
                overhead_rate: rates.overhead_rate,
            },
        )?;
        let margin = calculate_margin(breakdown.total_cost, scope.selling_price);

        Ok(CostingReport {
            cost: breakdown.to_summary(),
            selling_price: money::to_amount(scope.selling_price),
            margin: margin.to_summary(),
            currency: rates.currency.trim().to_string(),
        })
    }

    async fn get_product_row(&self, workshop_id: Uuid, product_id: Uuid) -> AppResult<ProductRow> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, workshop_id, name, sku, description, selling_price, created_at
            FROM products
            WHERE id = $1 AND workshop_id = $2
            "#,
        )
        .bind(product_id)
        .bind(workshop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }
}

/// Insert a version row with its BOM items and routing steps
async fn insert_version(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    version: i32,
    input: &CreateVersionInput,
) -> AppResult<ProductVersion> {
    let row = sqlx::query_as::<_, VersionRow>(
        r#"
        INSERT INTO product_versions (product_id, version, notes)
        VALUES ($1, $2, $3)
        RETURNING id, product_id, version, notes, active, created_at
        "#,
    )
    .bind(product_id)
    .bind(version)
    .bind(&input.notes)
    .fetch_one(&mut **tx)
    .await?;

    for item in &input.bom_items {
        sqlx::query(
            r#"
            INSERT INTO bom_items (product_version_id, material_id, quantity, scrap_factor)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(row.id)
        .bind(item.material_id)
        .bind(item.quantity)
        .bind(item.scrap_factor)
        .execute(&mut **tx)
        .await?;
    }

    for step in &input.routing {
        sqlx::query(
            r#"
            INSERT INTO routing_steps (
                product_version_id, step_number, operation_id, tool_id, estimated_time_min
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.id)
        .bind(step.step_number)
        .bind(step.operation_id)
        .bind(step.tool_id)
        .bind(step.estimated_time_min)
        .execute(&mut **tx)
        .await?;
    }

    Ok(row.into())
}

/// Validate a version payload before touching the database
fn validate_version_input(input: &CreateVersionInput) -> AppResult<()> {
    if input.bom_items.is_empty() {
        return Err(AppError::Validation {
            field: "bom_items".to_string(),
            message: "At least one material is required".to_string(),
        });
    }
    if input.routing.is_empty() {
        return Err(AppError::Validation {
            field: "routing".to_string(),
            message: "At least one routing step is required".to_string(),
        });
    }

    for item in &input.bom_items {
        validate_bom_item(item.quantity, item.scrap_factor).map_err(|msg| {
            AppError::Validation {
                field: "bom_items".to_string(),
                message: msg.to_string(),
            }
        })?;
    }

    let mut seen_steps = Vec::with_capacity(input.routing.len());
    for step in &input.routing {
        validate_routing_step(step.step_number, step.estimated_time_min).map_err(|msg| {
            AppError::Validation {
                field: "routing".to_string(),
                message: msg.to_string(),
            }
        })?;
        if seen_steps.contains(&step.step_number) {
            return Err(AppError::Validation {
                field: "routing".to_string(),
                message: "Routing step numbers must be unique".to_string(),
            });
        }
        seen_steps.push(step.step_number);
    }

    Ok(())
}
