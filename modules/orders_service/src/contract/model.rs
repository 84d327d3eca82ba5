//! Contract models for orders service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Raw scalar coming from a form or request before validation.
///
/// Ids arrive as numbers or numeric strings depending on the caller, so the
/// validators coerce from any of these shapes into the typed entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Field was not provided
    #[default]
    Absent,
    /// Integral number
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Free text (numeric strings, date strings)
    Text(String),
    /// Already-typed calendar date
    Date(NaiveDate),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Company record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Positive identifier chosen by the caller
    pub id: i64,
    /// Display name, trimmed and non-empty
    pub name: String,
}

/// Order type record (catalog of order categories)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderType {
    /// Positive identifier chosen by the caller
    pub id: i64,
    /// Display name, trimmed and non-empty
    pub name: String,
}

/// Order as read back from the store, with references resolved to names
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Caller-supplied identifier
    pub id: String,
    /// Order date
    pub date: NaiveDate,
    /// Name of the referenced order type
    pub order_type: String,
    /// Name of the referenced company
    pub company: String,
    /// Non-negative price
    pub price: f64,
    /// Optional free-text note
    pub observation: Option<String>,
}

/// Order in its write shape: references are raw ids
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub id: String,
    pub date: NaiveDate,
    pub order_type: i64,
    pub company: i64,
    pub price: f64,
    pub observation: Option<String>,
}

/// Unvalidated company payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyInput {
    pub id: FieldValue,
    pub name: String,
}

impl CompanyInput {
    pub fn new(id: impl Into<FieldValue>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Unvalidated order type payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderTypeInput {
    pub id: FieldValue,
    pub name: String,
}

impl OrderTypeInput {
    pub fn new(id: impl Into<FieldValue>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Unvalidated order payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderInput {
    pub id: String,
    pub date: FieldValue,
    pub order_type: FieldValue,
    pub company: FieldValue,
    pub price: FieldValue,
    pub observation: Option<String>,
}

/// Filter for the monthly order counts aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCountsQuery {
    /// Restrict to one company when set
    pub company: Option<i64>,
    /// Inclusive lower bound
    pub start_date: NaiveDate,
    /// Inclusive upper bound
    pub end_date: NaiveDate,
}

/// Filter for orders of one company within a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRangeQuery {
    pub company: i64,
    /// Inclusive lower bound
    pub start_date: NaiveDate,
    /// Inclusive upper bound
    pub end_date: NaiveDate,
}

/// One pivoted row of the monthly counts report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyOrderCount {
    /// Month label formatted as `YYYY/MM`
    pub month: String,
    /// Lowercased order type name -> number of orders
    pub counts: BTreeMap<String, i64>,
}

impl MonthlyOrderCount {
    /// Sum of all per-type counts in this month
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }
}
