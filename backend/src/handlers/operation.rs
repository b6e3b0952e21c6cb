//! Operation and tool library handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::operation::CreateNamedInput;
use crate::services::OperationService;
use crate::AppState;
use shared::{Operation, Tool};

/// GET /workshops/:workshop_id/operations
pub async fn list_operations(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Operation>>> {
    let service = OperationService::new(state.db.clone());
    Ok(Json(service.list_operations(workshop_id).await?))
}

/// POST /workshops/:workshop_id/operations
pub async fn create_operation(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<CreateNamedInput>,
) -> AppResult<Json<Operation>> {
    let service = OperationService::new(state.db.clone());
    Ok(Json(service.create_operation(workshop_id, input).await?))
}

/// GET /workshops/:workshop_id/tools
pub async fn list_tools(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Tool>>> {
    let service = OperationService::new(state.db.clone());
    Ok(Json(service.list_tools(workshop_id).await?))
}

/// POST /workshops/:workshop_id/tools
pub async fn create_tool(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<CreateNamedInput>,
) -> AppResult<Json<Tool>> {
    let service = OperationService::new(state.db.clone());
    Ok(Json(service.create_tool(workshop_id, input).await?))
}
