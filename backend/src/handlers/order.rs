//! Order handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::order::{CreateOrderInput, OrderDetails, UpdateStageInput};
use crate::services::OrderService;
use crate::AppState;
use shared::Order;

/// GET /workshops/:workshop_id/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db.clone());
    Ok(Json(service.list(workshop_id).await?))
}

/// POST /workshops/:workshop_id/orders
pub async fn create_order(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db.clone());
    Ok(Json(service.create(workshop_id, input).await?))
}

/// GET /workshops/:workshop_id/orders/:order_id
pub async fn get_order(
    State(state): State<AppState>,
    Path((workshop_id, order_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db.clone());
    Ok(Json(service.get(workshop_id, order_id).await?))
}

/// PUT /workshops/:workshop_id/orders/:order_id/stage
pub async fn update_order_stage(
    State(state): State<AppState>,
    Path((workshop_id, order_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateStageInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db.clone());
    Ok(Json(
        service.update_stage(workshop_id, order_id, input).await?,
    ))
}
