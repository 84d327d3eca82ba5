//! Domain service - business logic orchestration
//!
//! Every operation validates its input first, then talks to a repository and
//! classifies the outcome into an [`OrdersError`]. Store failures are logged
//! here, once, before being returned.

use super::aggregation::pivot_monthly_counts;
use super::export::orders_to_csv;
use super::repository::{CompanyRepository, OrderRepository, OrderTypeRepository};
use super::validation;
use crate::contract::{
    Company, CompanyInput, MonthlyOrderCount, Order, OrderCountsQuery, OrderInput,
    OrderRangeQuery, OrderType, OrderTypeInput, OrdersError, Resource,
};
use std::sync::Arc;

/// Domain service for companies, order types and orders
pub struct Service {
    company_repo: Arc<dyn CompanyRepository>,
    order_type_repo: Arc<dyn OrderTypeRepository>,
    order_repo: Arc<dyn OrderRepository>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        company_repo: Arc<dyn CompanyRepository>,
        order_type_repo: Arc<dyn OrderTypeRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            company_repo,
            order_type_repo,
            order_repo,
        }
    }

    // ===== Company Operations =====

    pub async fn list_companies(&self) -> Result<Vec<Company>, OrdersError> {
        self.company_repo
            .list_all()
            .await
            .map_err(|e| store_failure(Resource::Company, "fetching", e))
    }

    pub async fn get_company(&self, id: i64) -> Result<Option<Company>, OrdersError> {
        self.company_repo
            .find_by_id(id)
            .await
            .map_err(|e| store_failure(Resource::Company, "fetching", e))
    }

    pub async fn create_company(&self, input: &CompanyInput) -> Result<Company, OrdersError> {
        let company = validation::validate_company(input)?;
        let inserted = self
            .company_repo
            .insert(&company)
            .await
            .map_err(|e| store_failure(Resource::Company, "inserting", e))?;
        inserted.ok_or_else(|| insert_conflict(Resource::Company, company.id))
    }

    pub async fn update_company(&self, input: &CompanyInput) -> Result<Company, OrdersError> {
        let company = validation::validate_company(input)?;
        self.company_repo
            .update(&company)
            .await
            .map_err(|e| store_failure(Resource::Company, "updating", e))?
            .ok_or_else(|| OrdersError::not_found(Resource::Company, company.id))
    }

    pub async fn remove_company(&self, id: i64) -> Result<i64, OrdersError> {
        let id = validation::validate_catalog_id(id)?;
        let deleted = self
            .company_repo
            .delete(id)
            .await
            .map_err(|e| store_failure(Resource::Company, "deleting", e))?;
        if deleted {
            tracing::info!(company_id = id, "company deleted");
            Ok(id)
        } else {
            Err(OrdersError::not_found(Resource::Company, id))
        }
    }

    // ===== Order Type Operations =====

    pub async fn list_order_types(&self) -> Result<Vec<OrderType>, OrdersError> {
        self.order_type_repo
            .list_all()
            .await
            .map_err(|e| store_failure(Resource::OrderType, "fetching", e))
    }

    pub async fn get_order_type(&self, id: i64) -> Result<Option<OrderType>, OrdersError> {
        self.order_type_repo
            .find_by_id(id)
            .await
            .map_err(|e| store_failure(Resource::OrderType, "fetching", e))
    }

    pub async fn create_order_type(&self, input: &OrderTypeInput) -> Result<OrderType, OrdersError> {
        let order_type = validation::validate_order_type(input)?;
        let inserted = self
            .order_type_repo
            .insert(&order_type)
            .await
            .map_err(|e| store_failure(Resource::OrderType, "inserting", e))?;
        inserted.ok_or_else(|| insert_conflict(Resource::OrderType, order_type.id))
    }

    pub async fn update_order_type(&self, input: &OrderTypeInput) -> Result<OrderType, OrdersError> {
        let order_type = validation::validate_order_type(input)?;
        self.order_type_repo
            .update(&order_type)
            .await
            .map_err(|e| store_failure(Resource::OrderType, "updating", e))?
            .ok_or_else(|| OrdersError::not_found(Resource::OrderType, order_type.id))
    }

    pub async fn remove_order_type(&self, id: i64) -> Result<i64, OrdersError> {
        let id = validation::validate_catalog_id(id)?;
        let deleted = self
            .order_type_repo
            .delete(id)
            .await
            .map_err(|e| store_failure(Resource::OrderType, "deleting", e))?;
        if deleted {
            tracing::info!(order_type_id = id, "order type deleted");
            Ok(id)
        } else {
            Err(OrdersError::not_found(Resource::OrderType, id))
        }
    }

    // ===== Order Operations =====

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrdersError> {
        self.order_repo
            .list_all()
            .await
            .map_err(|e| store_failure(Resource::Order, "fetching", e))
    }

    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, OrdersError> {
        self.order_repo
            .find_by_id(id.trim())
            .await
            .map_err(|e| store_failure(Resource::Order, "fetching", e))
    }

    pub async fn create_order(&self, input: &OrderInput) -> Result<Order, OrdersError> {
        let order = validation::validate_order(input)?;
        let inserted = self
            .order_repo
            .insert(&order)
            .await
            .map_err(|e| store_failure(Resource::Order, "inserting", e))?;
        inserted.ok_or_else(|| insert_conflict(Resource::Order, &order.id))
    }

    pub async fn update_order(&self, input: &OrderInput) -> Result<Order, OrdersError> {
        let order = validation::validate_order(input)?;
        self.order_repo
            .update(&order)
            .await
            .map_err(|e| store_failure(Resource::Order, "updating", e))?
            .ok_or_else(|| OrdersError::not_found(Resource::Order, &order.id))
    }

    pub async fn remove_order(&self, id: &str) -> Result<String, OrdersError> {
        let id = validation::validate_order_id(id)?;
        let deleted = self
            .order_repo
            .delete(&id)
            .await
            .map_err(|e| store_failure(Resource::Order, "deleting", e))?;
        if deleted {
            tracing::info!(order_id = %id, "order deleted");
            Ok(id)
        } else {
            Err(OrdersError::not_found(Resource::Order, id))
        }
    }

    /// Orders per month with one count column per order type
    pub async fn order_counts_by_month(
        &self,
        query: &OrderCountsQuery,
    ) -> Result<Vec<MonthlyOrderCount>, OrdersError> {
        validation::validate_counts_query(query)?;

        let types = self.list_order_types().await?;
        let groups = self
            .order_repo
            .count_by_day_and_type(query)
            .await
            .map_err(|e| store_failure(Resource::Order, "counting", e))?;

        tracing::debug!(
            order_types = types.len(),
            groups = groups.len(),
            "pivoting monthly order counts"
        );
        Ok(pivot_monthly_counts(&types, &groups))
    }

    /// Orders of one company within an inclusive date range
    pub async fn orders_by_company_and_range(
        &self,
        query: &OrderRangeQuery,
    ) -> Result<Vec<Order>, OrdersError> {
        validation::validate_range_query(query)?;
        self.order_repo
            .find_by_company_and_range(query)
            .await
            .map_err(|e| store_failure(Resource::Order, "fetching", e))
    }

    /// CSV invoice for one company's orders within a date range
    pub async fn invoice_csv(&self, query: &OrderRangeQuery) -> Result<String, OrdersError> {
        let orders = self.orders_by_company_and_range(query).await?;
        Ok(orders_to_csv(&orders)?)
    }
}

// ===== Error classification =====

fn store_failure(resource: Resource, action: &str, error: anyhow::Error) -> OrdersError {
    tracing::error!(%resource, action, error = ?error, "store operation failed");
    OrdersError::database(format!("Error {action} {resource}: {error}"))
}

fn insert_conflict(resource: Resource, id: impl std::fmt::Display) -> OrdersError {
    tracing::error!(%resource, %id, "insert affected no rows");
    OrdersError::database(format!(
        "Error inserting {resource}: insertion failed, {resource} with Id {id} may already exist"
    ))
}
