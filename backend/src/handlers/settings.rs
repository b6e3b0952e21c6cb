//! Workshop settings handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::settings::UpdateSettingsInput;
use crate::services::SettingsService;
use crate::AppState;
use shared::WorkshopSettings;

/// GET /workshops/:workshop_id/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<WorkshopSettings>> {
    let service = SettingsService::new(state.db.clone());
    Ok(Json(service.get(workshop_id).await?))
}

/// PUT /workshops/:workshop_id/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<UpdateSettingsInput>,
) -> AppResult<Json<WorkshopSettings>> {
    let service = SettingsService::new(state.db.clone());
    Ok(Json(service.update(workshop_id, input).await?))
}
