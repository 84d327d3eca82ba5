//! Input validation for companies, order types and orders
//!
//! Each validator checks every field and reports all violations at once.
//! Nothing here touches the store.

use crate::contract::{
    Company, CompanyInput, FieldValue, NewOrder, OrderCountsQuery, OrderInput, OrderRangeQuery,
    OrderType, OrderTypeInput, ValidationError,
};
use chrono::{DateTime, NaiveDate};

/// Date formats accepted from forms and query strings
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Validate a company payload into a typed [`Company`]
pub fn validate_company(input: &CompanyInput) -> Result<Company, ValidationError> {
    let mut errors = ValidationError::default();

    let id = positive_id(&input.id)
        .map_err(|msg| errors.push("Id", format!("Company {msg}")))
        .ok();
    let name = non_blank(&input.name)
        .map_err(|_| errors.push("Name", "Company name cannot be empty."))
        .ok();

    match (id, name) {
        (Some(id), Some(name)) if errors.is_empty() => Ok(Company { id, name }),
        _ => Err(errors),
    }
}

/// Validate an order type payload into a typed [`OrderType`]
pub fn validate_order_type(input: &OrderTypeInput) -> Result<OrderType, ValidationError> {
    let mut errors = ValidationError::default();

    let id = positive_id(&input.id)
        .map_err(|msg| errors.push("Id", format!("Order type {msg}")))
        .ok();
    let name = non_blank(&input.name)
        .map_err(|_| errors.push("Name", "Order type name cannot be empty."))
        .ok();

    match (id, name) {
        (Some(id), Some(name)) if errors.is_empty() => Ok(OrderType { id, name }),
        _ => Err(errors),
    }
}

/// Validate an order payload into its write shape
pub fn validate_order(input: &OrderInput) -> Result<NewOrder, ValidationError> {
    let mut errors = ValidationError::default();

    let id = non_blank(&input.id)
        .map_err(|_| errors.push("Id", "Order ID is required."))
        .ok();
    let date = coerce_date(&input.date)
        .map_err(|msg| errors.push("Date", msg))
        .ok();
    let order_type = positive_id(&input.order_type)
        .map_err(|msg| errors.push("Type", format!("Order type {msg}")))
        .ok();
    let company = positive_id(&input.company)
        .map_err(|msg| errors.push("Company", format!("Company {msg}")))
        .ok();
    let price = non_negative_price(&input.price)
        .map_err(|msg| errors.push("Price", msg))
        .ok();

    match (id, date, order_type, company, price) {
        (Some(id), Some(date), Some(order_type), Some(company), Some(price)) if errors.is_empty() => {
            Ok(NewOrder {
                id,
                date,
                order_type,
                company,
                price,
                observation: normalize_observation(input.observation.as_deref()),
            })
        }
        _ => Err(errors),
    }
}

/// Validate the id of a company or order type before deletion
pub fn validate_catalog_id(id: i64) -> Result<i64, ValidationError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ValidationError::single(
            "Id",
            format!("Invalid ID {id}: must be a positive number."),
        ))
    }
}

/// Validate an order id before lookup or deletion
pub fn validate_order_id(id: &str) -> Result<String, ValidationError> {
    non_blank(id).map_err(|_| ValidationError::single("Id", "Order ID is required."))
}

/// Validate the monthly counts filter
pub fn validate_counts_query(query: &OrderCountsQuery) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if let Some(company) = query.company {
        if company <= 0 {
            errors.push("Company", "Company ID must be a positive integer.");
        }
    }
    check_range(&mut errors, query.start_date, query.end_date);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the company + date range filter
pub fn validate_range_query(query: &OrderRangeQuery) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if query.company <= 0 {
        errors.push("Company", "Company ID must be a positive integer.");
    }
    check_range(&mut errors, query.start_date, query.end_date);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a single date field, reporting failures under `field`
pub fn parse_date_field(field: &'static str, value: &FieldValue) -> Result<NaiveDate, ValidationError> {
    coerce_date(value).map_err(|msg| ValidationError::single(field, msg))
}

/// Parse an id-like field, reporting failures under `field`
pub fn parse_id_field(field: &'static str, value: &FieldValue) -> Result<i64, ValidationError> {
    positive_id(value).map_err(|msg| ValidationError::single(field, format!("{field} {msg}")))
}

fn check_range(errors: &mut ValidationError, start: NaiveDate, end: NaiveDate) {
    if start > end {
        errors.push(
            "EndDate",
            format!("End date {end} must not be before start date {start}."),
        );
    }
}

fn non_blank(value: &str) -> Result<String, ()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(())
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_observation(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Positive 64-bit id from a number or a string of digits
fn positive_id(value: &FieldValue) -> Result<i64, String> {
    const MSG: &str = "ID must be a positive integer.";
    let id = match value {
        FieldValue::Absent => return Err("ID is required.".to_string()),
        FieldValue::Integer(n) => *n,
        FieldValue::Number(f) => {
            if f.fract() != 0.0 || !f.is_finite() || *f >= i64::MAX as f64 {
                return Err(MSG.to_string());
            }
            *f as i64
        }
        FieldValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MSG.to_string());
            }
            s.parse::<i64>().map_err(|_| MSG.to_string())?
        }
        FieldValue::Date(_) => return Err(MSG.to_string()),
    };
    if id > 0 {
        Ok(id)
    } else {
        Err(MSG.to_string())
    }
}

fn non_negative_price(value: &FieldValue) -> Result<f64, String> {
    const MSG: &str = "Price must be a non-negative number.";
    let price = match value {
        FieldValue::Absent => return Err("Price is required.".to_string()),
        FieldValue::Integer(n) => *n as f64,
        FieldValue::Number(f) => *f,
        FieldValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("Price is required.".to_string());
            }
            s.parse::<f64>().map_err(|_| MSG.to_string())?
        }
        FieldValue::Date(_) => return Err(MSG.to_string()),
    };
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(MSG.to_string())
    }
}

fn coerce_date(value: &FieldValue) -> Result<NaiveDate, String> {
    match value {
        FieldValue::Absent => Err("Date is required.".to_string()),
        FieldValue::Date(d) => Ok(*d),
        FieldValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("Date is required.".to_string());
            }
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
                .ok_or_else(|| format!("Date '{s}' is not a valid date (expected YYYY-MM-DD)."))
        }
        FieldValue::Integer(_) | FieldValue::Number(_) => {
            Err("Date must be a date value.".to_string())
        }
    }
}
