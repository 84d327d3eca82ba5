//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::OrdersApi;
pub use error::{FieldViolation, OrdersError, Resource, ValidationError};
pub use model::{
    Company, CompanyInput, FieldValue, MonthlyOrderCount, NewOrder, Order, OrderCountsQuery,
    OrderInput, OrderRangeQuery, OrderType, OrderTypeInput,
};
