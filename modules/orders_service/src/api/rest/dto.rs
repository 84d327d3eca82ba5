//! REST DTOs with serde derives for HTTP API
//!
//! Field names are PascalCase on the wire (`Id`, `Name`, `Type`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ===== Catalog DTOs =====

/// Company response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyDto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Acme")]
    pub name: String,
}

/// Order type response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct OrderTypeDto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Repair")]
    pub name: String,
}

/// A form scalar: ids and prices may arrive as numbers or numeric strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScalarDto {
    Integer(i64),
    Number(f64),
    Text(String),
}

/// Create/update company or order type request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogRequest {
    /// Ignored on update; the path id wins
    #[serde(default)]
    pub id: Option<ScalarDto>,
    #[serde(default)]
    pub name: String,
}

// ===== Order DTOs =====

/// Order response DTO with type and company names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDto {
    #[schema(example = "INV-2024-001")]
    pub id: String,
    pub date: NaiveDate,
    /// Order type name
    #[serde(rename = "Type")]
    pub order_type: String,
    pub price: f64,
    /// Company name
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

/// Create/update order request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct OrderRequest {
    /// Ignored on update; the path id wins
    #[serde(default)]
    pub id: String,
    /// `YYYY-MM-DD` or `YYYY/MM/DD`
    #[serde(default)]
    pub date: Option<ScalarDto>,
    /// Order type id
    #[serde(default, rename = "Type")]
    pub order_type: Option<ScalarDto>,
    /// Company id
    #[serde(default)]
    pub company: Option<ScalarDto>,
    #[serde(default)]
    pub price: Option<ScalarDto>,
    #[serde(default)]
    pub observation: Option<String>,
}

// ===== Report DTOs =====

/// One row of the monthly counts report: `{"Date": "2024/04", "repair": 3, ...}`
///
/// The per-type columns are dynamic, so this row has no static schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCountDto {
    #[serde(rename = "Date")]
    pub month: String,
    /// Lowercased order type name -> count
    #[serde(flatten)]
    pub counts: BTreeMap<String, i64>,
}

/// Query string of the monthly counts report
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountsQueryParams {
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query string of the orders-by-range and invoice endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangeQueryParams {
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response of a company or order type delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct DeletedCatalogDto {
    pub id: i64,
}

/// Response of an order delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct DeletedOrderDto {
    pub id: String,
}
