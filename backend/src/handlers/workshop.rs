//! Workshop handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::workshop::CreateWorkshopInput;
use crate::services::WorkshopService;
use crate::AppState;
use shared::Workshop;

/// GET /workshops
pub async fn list_workshops(State(state): State<AppState>) -> AppResult<Json<Vec<Workshop>>> {
    let service = WorkshopService::new(state.db.clone());
    Ok(Json(service.list().await?))
}

/// POST /workshops
pub async fn create_workshop(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkshopInput>,
) -> AppResult<Json<Workshop>> {
    let service = WorkshopService::new(state.db.clone());
    Ok(Json(service.create(input).await?))
}

/// GET /workshops/:workshop_id
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Workshop>> {
    let service = WorkshopService::new(state.db.clone());
    Ok(Json(service.get(workshop_id).await?))
}
