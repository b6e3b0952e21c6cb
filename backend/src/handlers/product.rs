//! Product and costing handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product::{
    CostingReport, CreateProductInput, CreateVersionInput, ProductDetails, ProductSummary,
};
use crate::services::ProductService;
use crate::AppState;
use shared::{Product, ProductVersion};

/// GET /workshops/:workshop_id/products
pub async fn list_products(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.list(workshop_id).await?))
}

/// POST /workshops/:workshop_id/products
pub async fn create_product(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.create(workshop_id, input).await?))
}

/// GET /workshops/:workshop_id/products/:product_id
pub async fn get_product(
    State(state): State<AppState>,
    Path((workshop_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ProductDetails>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.get(workshop_id, product_id).await?))
}

/// POST /workshops/:workshop_id/products/:product_id/versions
pub async fn create_product_version(
    State(state): State<AppState>,
    Path((workshop_id, product_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<CreateVersionInput>,
) -> AppResult<Json<ProductVersion>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(
        service.create_version(workshop_id, product_id, input).await?,
    ))
}

/// GET /workshops/:workshop_id/products/versions/:version_id/costing
pub async fn get_costing(
    State(state): State<AppState>,
    Path((workshop_id, version_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<CostingReport>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.get_costing(workshop_id, version_id).await?))
}
