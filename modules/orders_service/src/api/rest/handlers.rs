//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{
    CompanyInput, FieldValue, OrderCountsQuery, OrderInput, OrderRangeQuery, OrderTypeInput,
    OrdersError, Resource,
};
use crate::domain::{validation::parse_id_field, Service};
use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

type Svc = Extension<Arc<Service>>;

fn path_id(raw: String) -> Result<i64, Problem> {
    Ok(parse_id_field("Id", &FieldValue::Text(raw))?)
}

// ===== Company Handlers =====

pub async fn list_companies(Extension(service): Svc) -> Result<Json<Vec<CompanyDto>>, Problem> {
    let companies = service.list_companies().await?;
    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

pub async fn get_company(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<CompanyDto>, Problem> {
    let id = path_id(id)?;
    let company = service
        .get_company(id)
        .await?
        .ok_or_else(|| map_domain_error(OrdersError::not_found(Resource::Company, id)))?;
    Ok(Json(company.into()))
}

pub async fn create_company(
    Extension(service): Svc,
    Json(req): Json<CatalogRequest>,
) -> Result<(StatusCode, Json<CompanyDto>), Problem> {
    let company = service.create_company(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(company.into())))
}

pub async fn update_company(
    Extension(service): Svc,
    Path(id): Path<String>,
    Json(req): Json<CatalogRequest>,
) -> Result<Json<CompanyDto>, Problem> {
    let input = CompanyInput {
        id: FieldValue::Text(id),
        name: req.name,
    };
    let company = service.update_company(&input).await?;
    Ok(Json(company.into()))
}

pub async fn delete_company(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<DeletedCatalogDto>, Problem> {
    let id = service.remove_company(path_id(id)?).await?;
    Ok(Json(DeletedCatalogDto { id }))
}

// ===== Order Type Handlers =====

pub async fn list_order_types(
    Extension(service): Svc,
) -> Result<Json<Vec<OrderTypeDto>>, Problem> {
    let types = service.list_order_types().await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

pub async fn get_order_type(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<OrderTypeDto>, Problem> {
    let id = path_id(id)?;
    let order_type = service
        .get_order_type(id)
        .await?
        .ok_or_else(|| map_domain_error(OrdersError::not_found(Resource::OrderType, id)))?;
    Ok(Json(order_type.into()))
}

pub async fn create_order_type(
    Extension(service): Svc,
    Json(req): Json<CatalogRequest>,
) -> Result<(StatusCode, Json<OrderTypeDto>), Problem> {
    let order_type = service.create_order_type(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(order_type.into())))
}

pub async fn update_order_type(
    Extension(service): Svc,
    Path(id): Path<String>,
    Json(req): Json<CatalogRequest>,
) -> Result<Json<OrderTypeDto>, Problem> {
    let input = OrderTypeInput {
        id: FieldValue::Text(id),
        name: req.name,
    };
    let order_type = service.update_order_type(&input).await?;
    Ok(Json(order_type.into()))
}

pub async fn delete_order_type(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<DeletedCatalogDto>, Problem> {
    let id = service.remove_order_type(path_id(id)?).await?;
    Ok(Json(DeletedCatalogDto { id }))
}

// ===== Order Handlers =====

pub async fn list_orders(Extension(service): Svc) -> Result<Json<Vec<OrderDto>>, Problem> {
    let orders = service.list_orders().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

pub async fn get_order(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<OrderDto>, Problem> {
    let order = service
        .get_order(&id)
        .await?
        .ok_or_else(|| map_domain_error(OrdersError::not_found(Resource::Order, id.trim())))?;
    Ok(Json(order.into()))
}

pub async fn create_order(
    Extension(service): Svc,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderDto>), Problem> {
    let order = service.create_order(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn update_order(
    Extension(service): Svc,
    Path(id): Path<String>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderDto>, Problem> {
    let input = OrderInput {
        id,
        ..OrderInput::from(req)
    };
    let order = service.update_order(&input).await?;
    Ok(Json(order.into()))
}

pub async fn delete_order(
    Extension(service): Svc,
    Path(id): Path<String>,
) -> Result<Json<DeletedOrderDto>, Problem> {
    let id = service.remove_order(&id).await?;
    Ok(Json(DeletedOrderDto { id }))
}

// ===== Report Handlers =====

pub async fn order_counts_by_month(
    Extension(service): Svc,
    Query(params): Query<CountsQueryParams>,
) -> Result<Json<Vec<MonthlyCountDto>>, Problem> {
    let query = OrderCountsQuery::try_from(params)?;
    let rows = service.order_counts_by_month(&query).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn orders_by_range(
    Extension(service): Svc,
    Query(params): Query<RangeQueryParams>,
) -> Result<Json<Vec<OrderDto>>, Problem> {
    let query = OrderRangeQuery::try_from(params)?;
    let orders = service.orders_by_company_and_range(&query).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

pub async fn invoice_csv(
    Extension(service): Svc,
    Query(params): Query<RangeQueryParams>,
) -> Result<impl IntoResponse, Problem> {
    let query = OrderRangeQuery::try_from(params)?;
    let csv = service.invoice_csv(&query).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    ))
}

/// Body of the legacy `GET /api` listing
#[derive(Debug, Serialize)]
pub struct LegacyListing {
    /// Orders by date; the key name is what existing consumers read
    pub companies: Vec<OrderDto>,
}

pub async fn legacy_listing(Extension(service): Svc) -> Result<Json<LegacyListing>, Problem> {
    let orders = service.list_orders().await?;
    Ok(Json(LegacyListing {
        companies: orders.into_iter().map(Into::into).collect(),
    }))
}
