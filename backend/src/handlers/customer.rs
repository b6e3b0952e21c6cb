//! Customer handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::customer::CreateCustomerInput;
use crate::services::CustomerService;
use crate::AppState;
use shared::Customer;

/// GET /workshops/:workshop_id/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> AppResult<Json<Vec<Customer>>> {
    let service = CustomerService::new(state.db.clone());
    Ok(Json(service.list(workshop_id).await?))
}

/// POST /workshops/:workshop_id/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db.clone());
    Ok(Json(service.create(workshop_id, input).await?))
}

/// GET /workshops/:workshop_id/customers/:customer_id
pub async fn get_customer(
    State(state): State<AppState>,
    Path((workshop_id, customer_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db.clone());
    Ok(Json(service.get(workshop_id, customer_id).await?))
}
