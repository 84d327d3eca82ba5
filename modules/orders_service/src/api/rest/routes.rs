//! Route registration

use super::handlers;
use crate::domain::Service;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

/// Register all REST routes on `router`
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/api", get(handlers::legacy_listing))
        // Companies
        .route(
            "/companies",
            get(handlers::list_companies).post(handlers::create_company),
        )
        .route(
            "/companies/{id}",
            get(handlers::get_company)
                .put(handlers::update_company)
                .delete(handlers::delete_company),
        )
        // Order types
        .route(
            "/order-types",
            get(handlers::list_order_types).post(handlers::create_order_type),
        )
        .route(
            "/order-types/{id}",
            get(handlers::get_order_type)
                .put(handlers::update_order_type)
                .delete(handlers::delete_order_type),
        )
        // Orders and reports; static segments take precedence over `{id}`
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/counts-by-month", get(handlers::order_counts_by_month))
        .route("/orders/range", get(handlers::orders_by_range))
        .route("/orders/invoice.csv", get(handlers::invoice_csv))
        .route(
            "/orders/{id}",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .layer(Extension(service))
}
