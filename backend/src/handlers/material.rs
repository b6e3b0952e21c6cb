//! Material handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::material::MaterialInput;
use crate::services::MaterialService;
use crate::AppState;
use shared::Material;

/// GET /workshops/:workshop_id/materials
pub async fn list_materials(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.list(workshop_id).await?))
}

/// POST /workshops/:workshop_id/materials
pub async fn create_material(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<MaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.create(workshop_id, input).await?))
}

/// GET /workshops/:workshop_id/materials/:material_id
pub async fn get_material(
    State(state): State<AppState>,
    Path((workshop_id, material_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.get(workshop_id, material_id).await?))
}

/// PUT /workshops/:workshop_id/materials/:material_id
pub async fn update_material(
    State(state): State<AppState>,
    Path((workshop_id, material_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<MaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.update(workshop_id, material_id, input).await?))
}

/// DELETE /workshops/:workshop_id/materials/:material_id
pub async fn delete_material(
    State(state): State<AppState>,
    Path((workshop_id, material_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = MaterialService::new(state.db.clone());
    service.delete(workshop_id, material_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
