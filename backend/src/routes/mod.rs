//! API route definitions
//!
//! Everything except workshop creation and listing is nested under
//! /workshops/:workshop_id, which keeps the tenant scope explicit in every
//! URL instead of hiding it in ambient request state.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    analytics, customer, material, operation, order, product, settings, workshop,
};
use crate::AppState;

/// All /api/v1 routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workshops",
            get(workshop::list_workshops).post(workshop::create_workshop),
        )
        .route("/workshops/:workshop_id", get(workshop::get_workshop))
        .nest("/workshops/:workshop_id", workshop_scoped_routes())
}

/// Routes scoped to one workshop
fn workshop_scoped_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/materials",
            get(material::list_materials).post(material::create_material),
        )
        .route(
            "/materials/:material_id",
            get(material::get_material)
                .put(material::update_material)
                .delete(material::delete_material),
        )
        .route(
            "/operations",
            get(operation::list_operations).post(operation::create_operation),
        )
        .route(
            "/tools",
            get(operation::list_tools).post(operation::create_tool),
        )
        .route(
            "/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route("/customers/:customer_id", get(customer::get_customer))
        .route(
            "/products",
            get(product::list_products).post(product::create_product),
        )
        .route("/products/:product_id", get(product::get_product))
        .route(
            "/products/:product_id/versions",
            post(product::create_product_version),
        )
        .route(
            "/products/versions/:version_id/costing",
            get(product::get_costing),
        )
        .route("/orders", get(order::list_orders).post(order::create_order))
        .route("/orders/:order_id", get(order::get_order))
        .route("/orders/:order_id/stage", put(order::update_order_stage))
        .route("/analytics/kpis", get(analytics::get_kpis))
}
