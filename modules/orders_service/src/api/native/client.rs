//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Company, CompanyInput, MonthlyOrderCount, Order, OrderCountsQuery, OrderInput,
    OrderRangeQuery, OrderType, OrderTypeInput, OrdersApi, OrdersError,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by the client-state store when it runs in the same process as the
/// service, without HTTP in between.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl OrdersApi for NativeClient {
    async fn fetch_companies(&self) -> Result<Vec<Company>, OrdersError> {
        self.service.list_companies().await
    }

    async fn fetch_company(&self, id: i64) -> Result<Option<Company>, OrdersError> {
        self.service.get_company(id).await
    }

    async fn create_company(&self, input: CompanyInput) -> Result<Company, OrdersError> {
        self.service.create_company(&input).await
    }

    async fn update_company(&self, input: CompanyInput) -> Result<Company, OrdersError> {
        self.service.update_company(&input).await
    }

    async fn remove_company(&self, id: i64) -> Result<i64, OrdersError> {
        self.service.remove_company(id).await
    }

    async fn fetch_order_types(&self) -> Result<Vec<OrderType>, OrdersError> {
        self.service.list_order_types().await
    }

    async fn fetch_order_type(&self, id: i64) -> Result<Option<OrderType>, OrdersError> {
        self.service.get_order_type(id).await
    }

    async fn create_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError> {
        self.service.create_order_type(&input).await
    }

    async fn update_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError> {
        self.service.update_order_type(&input).await
    }

    async fn remove_order_type(&self, id: i64) -> Result<i64, OrdersError> {
        self.service.remove_order_type(id).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrdersError> {
        self.service.list_orders().await
    }

    async fn fetch_order(&self, id: &str) -> Result<Option<Order>, OrdersError> {
        self.service.get_order(id).await
    }

    async fn create_order(&self, input: OrderInput) -> Result<Order, OrdersError> {
        self.service.create_order(&input).await
    }

    async fn update_order(&self, input: OrderInput) -> Result<Order, OrdersError> {
        self.service.update_order(&input).await
    }

    async fn remove_order(&self, id: &str) -> Result<String, OrdersError> {
        self.service.remove_order(id).await
    }

    async fn fetch_order_counts_by_month(
        &self,
        query: OrderCountsQuery,
    ) -> Result<Vec<MonthlyOrderCount>, OrdersError> {
        self.service.order_counts_by_month(&query).await
    }

    async fn fetch_orders_by_company_and_range(
        &self,
        query: OrderRangeQuery,
    ) -> Result<Vec<Order>, OrdersError> {
        self.service.orders_by_company_and_range(&query).await
    }
}
