//! Native client trait for inter-module communication
//!
//! This trait defines the API that the UI layer (and other modules) use to
//! interact with the orders service. NO HTTP - direct function calls.

use super::{
    error::OrdersError,
    model::{
        Company, CompanyInput, MonthlyOrderCount, Order, OrderCountsQuery, OrderInput,
        OrderRangeQuery, OrderType, OrderTypeInput,
    },
};
use async_trait::async_trait;

/// Orders service API for inter-module communication
#[async_trait]
pub trait OrdersApi: Send + Sync {
    // ===== Company Operations =====

    /// List all companies ordered by id
    async fn fetch_companies(&self) -> Result<Vec<Company>, OrdersError>;

    /// Get a company, `None` when absent
    async fn fetch_company(&self, id: i64) -> Result<Option<Company>, OrdersError>;

    async fn create_company(&self, input: CompanyInput) -> Result<Company, OrdersError>;

    async fn update_company(&self, input: CompanyInput) -> Result<Company, OrdersError>;

    /// Delete a company and return its id
    async fn remove_company(&self, id: i64) -> Result<i64, OrdersError>;

    // ===== Order Type Operations =====

    async fn fetch_order_types(&self) -> Result<Vec<OrderType>, OrdersError>;

    async fn fetch_order_type(&self, id: i64) -> Result<Option<OrderType>, OrdersError>;

    async fn create_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError>;

    async fn update_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError>;

    async fn remove_order_type(&self, id: i64) -> Result<i64, OrdersError>;

    // ===== Order Operations =====

    /// List all orders ordered by date
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrdersError>;

    async fn fetch_order(&self, id: &str) -> Result<Option<Order>, OrdersError>;

    async fn create_order(&self, input: OrderInput) -> Result<Order, OrdersError>;

    async fn update_order(&self, input: OrderInput) -> Result<Order, OrdersError>;

    async fn remove_order(&self, id: &str) -> Result<String, OrdersError>;

    /// Orders per month, one column per order type
    async fn fetch_order_counts_by_month(
        &self,
        query: OrderCountsQuery,
    ) -> Result<Vec<MonthlyOrderCount>, OrdersError>;

    /// Orders of one company within an inclusive date range
    async fn fetch_orders_by_company_and_range(
        &self,
        query: OrderRangeQuery,
    ) -> Result<Vec<Order>, OrdersError>;
}
