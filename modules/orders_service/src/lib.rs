//! Orders Service Module
//!
//! Companies, order types and orders stored in a relational database, with
//! monthly reporting, CSV invoices and a client-state store that mirrors
//! server data for a UI.

// Public exports
pub mod contract;
pub use contract::{
    client::OrdersApi, error::OrdersError, Company, CompanyInput, FieldValue, MonthlyOrderCount,
    Order, OrderCountsQuery, OrderInput, OrderRangeQuery, OrderType, OrderTypeInput,
    ValidationError,
};

pub mod client_state;
pub use client_state::Store;

pub mod config;
pub use config::Config;

pub mod logging;

pub mod module;
pub use module::OrdersServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
