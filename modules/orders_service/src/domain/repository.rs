//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs
//!
//! Mutating methods report "nothing matched" through their return value
//! (`None` / `false`) instead of an error; the service decides how to classify it.

use crate::contract::{Company, NewOrder, Order, OrderCountsQuery, OrderRangeQuery, OrderType};
use crate::domain::aggregation::DailyTypeCount;
use anyhow::Result;
use async_trait::async_trait;

/// Repository for companies
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// List all companies ordered by id
    async fn list_all(&self) -> Result<Vec<Company>>;

    /// Find a company by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>>;

    /// Insert unless the id is taken; returns the re-fetched row or `None` on conflict
    async fn insert(&self, company: &Company) -> Result<Option<Company>>;

    /// Replace the row with the same id; returns the re-fetched row or `None` if absent
    async fn update(&self, company: &Company) -> Result<Option<Company>>;

    /// Delete by id; `false` when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Repository for order types
#[async_trait]
pub trait OrderTypeRepository: Send + Sync {
    /// List all order types ordered by id
    async fn list_all(&self) -> Result<Vec<OrderType>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<OrderType>>;

    async fn insert(&self, order_type: &OrderType) -> Result<Option<OrderType>>;

    async fn update(&self, order_type: &OrderType) -> Result<Option<OrderType>>;

    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Repository for orders
///
/// Reads return orders with type and company resolved to their names.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List all orders ordered by date
    async fn list_all(&self) -> Result<Vec<Order>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>>;

    async fn insert(&self, order: &NewOrder) -> Result<Option<Order>>;

    async fn update(&self, order: &NewOrder) -> Result<Option<Order>>;

    async fn delete(&self, id: &str) -> Result<bool>;

    /// Orders of one company within an inclusive date range, by date
    async fn find_by_company_and_range(&self, query: &OrderRangeQuery) -> Result<Vec<Order>>;

    /// Number of orders grouped by (date, order type id)
    async fn count_by_day_and_type(&self, query: &OrderCountsQuery) -> Result<Vec<DailyTypeCount>>;
}
