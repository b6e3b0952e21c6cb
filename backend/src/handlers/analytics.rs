//! Dashboard analytics handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::AnalyticsService;
use crate::AppState;
use shared::KpiSnapshot;

/// GET /workshops/:workshop_id/analytics/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<KpiSnapshot>> {
    let service = AnalyticsService::new(state.db.clone());
    Ok(Json(service.get_kpis(workshop_id).await?))
}
