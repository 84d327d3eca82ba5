//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    self, CompanyInput, FieldValue, OrderCountsQuery, OrderInput, OrderRangeQuery,
    OrderTypeInput, ValidationError,
};
use crate::domain::validation::{parse_date_field, parse_id_field};

// ===== Scalar conversions =====

impl From<ScalarDto> for FieldValue {
    fn from(value: ScalarDto) -> Self {
        match value {
            ScalarDto::Integer(v) => FieldValue::Integer(v),
            ScalarDto::Number(v) => FieldValue::Number(v),
            ScalarDto::Text(v) => FieldValue::Text(v),
        }
    }
}

fn text_field(value: Option<String>) -> FieldValue {
    value.map(FieldValue::Text).unwrap_or_default()
}

// ===== Catalog conversions =====

impl From<contract::Company> for CompanyDto {
    fn from(company: contract::Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
        }
    }
}

impl From<contract::OrderType> for OrderTypeDto {
    fn from(order_type: contract::OrderType) -> Self {
        Self {
            id: order_type.id,
            name: order_type.name,
        }
    }
}

impl From<CatalogRequest> for CompanyInput {
    fn from(req: CatalogRequest) -> Self {
        Self {
            id: req.id.into(),
            name: req.name,
        }
    }
}

impl From<CatalogRequest> for OrderTypeInput {
    fn from(req: CatalogRequest) -> Self {
        Self {
            id: req.id.into(),
            name: req.name,
        }
    }
}

// ===== Order conversions =====

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            date: order.date,
            order_type: order.order_type,
            price: order.price,
            company: order.company,
            observation: order.observation,
        }
    }
}

impl From<OrderRequest> for OrderInput {
    fn from(req: OrderRequest) -> Self {
        Self {
            id: req.id,
            date: req.date.into(),
            order_type: req.order_type.into(),
            company: req.company.into(),
            price: req.price.into(),
            observation: req.observation,
        }
    }
}

// ===== Report conversions =====

impl From<contract::MonthlyOrderCount> for MonthlyCountDto {
    fn from(row: contract::MonthlyOrderCount) -> Self {
        Self {
            month: row.month,
            counts: row.counts,
        }
    }
}

impl TryFrom<CountsQueryParams> for OrderCountsQuery {
    type Error = ValidationError;

    fn try_from(params: CountsQueryParams) -> Result<Self, Self::Error> {
        let mut errors = ValidationError::default();

        let company = match params.company.filter(|c| !c.trim().is_empty()) {
            Some(raw) => parse_id_field("Company", &FieldValue::Text(raw))
                .map_err(|e| errors.violations.extend(e.violations))
                .ok(),
            None => None,
        };
        let start = parse_date_field("StartDate", &text_field(params.start_date))
            .map_err(|e| errors.violations.extend(e.violations))
            .ok();
        let end = parse_date_field("EndDate", &text_field(params.end_date))
            .map_err(|e| errors.violations.extend(e.violations))
            .ok();

        match (start, end) {
            (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(Self {
                company,
                start_date,
                end_date,
            }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<RangeQueryParams> for OrderRangeQuery {
    type Error = ValidationError;

    fn try_from(params: RangeQueryParams) -> Result<Self, Self::Error> {
        let mut errors = ValidationError::default();

        let company = parse_id_field("Company", &text_field(params.company))
            .map_err(|e| errors.violations.extend(e.violations))
            .ok();
        let start = parse_date_field("StartDate", &text_field(params.start_date))
            .map_err(|e| errors.violations.extend(e.violations))
            .ok();
        let end = parse_date_field("EndDate", &text_field(params.end_date))
            .map_err(|e| errors.violations.extend(e.violations))
            .ok();

        match (company, start, end) {
            (Some(company), Some(start_date), Some(end_date)) if errors.is_empty() => Ok(Self {
                company,
                start_date,
                end_date,
            }),
            _ => Err(errors),
        }
    }
}
