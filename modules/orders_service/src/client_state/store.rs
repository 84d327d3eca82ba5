//! Client-state store over an [`OrdersApi`]
//!
//! Each async operation dispatches `pending` before calling the API and one
//! `fulfilled` or `rejected` action afterwards, tagged with a fresh operation
//! id. Locks are only taken to apply an action, never across an `.await`.

use super::invoice::{InvoiceAction, InvoiceSlice, InvoiceView};
use super::orders::{OrderAction, OrderSlice, OrderView};
use super::slice::{OpId, Reducer, Slice, SliceAction, SliceView};
use crate::contract::{
    Company, CompanyInput, MonthlyOrderCount, Order, OrderCountsQuery, OrderInput,
    OrderRangeQuery, OrderType, OrderTypeInput, OrdersApi, OrdersError,
};
use crate::domain::export::orders_to_csv;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Error recorded in a slice when a caller drops an operation before it settles
pub const OPERATION_CANCELLED: &str = "Operation cancelled";

/// Companies, order types, orders and invoice slices behind one API handle
pub struct Store {
    api: Arc<dyn OrdersApi>,
    companies: RwLock<Slice<Company>>,
    order_types: RwLock<Slice<OrderType>>,
    orders: RwLock<OrderSlice>,
    invoice: RwLock<InvoiceSlice>,
    next_op: AtomicU64,
}

impl Store {
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            companies: RwLock::new(Slice::default()),
            order_types: RwLock::new(Slice::default()),
            orders: RwLock::new(OrderSlice::default()),
            invoice: RwLock::new(InvoiceSlice::default()),
            next_op: AtomicU64::new(1),
        }
    }

    // ===== Selectors =====

    pub fn companies(&self) -> SliceView<Company> {
        self.companies.read().view()
    }

    pub fn order_types(&self) -> SliceView<OrderType> {
        self.order_types.read().view()
    }

    pub fn orders(&self) -> OrderView {
        self.orders.read().view()
    }

    pub fn invoice(&self) -> InvoiceView {
        self.invoice.read().view()
    }

    // ===== Companies =====

    pub async fn fetch_companies(&self) -> Result<Vec<Company>, OrdersError> {
        self.dispatch(
            &self.companies,
            "fetch_companies",
            self.api.fetch_companies(),
            |op, items| SliceAction::FetchFulfilled { op, items },
        )
        .await
    }

    pub async fn create_company(&self, input: CompanyInput) -> Result<Company, OrdersError> {
        self.dispatch(
            &self.companies,
            "create_company",
            self.api.create_company(input),
            |op, item| SliceAction::CreateFulfilled { op, item },
        )
        .await
    }

    pub async fn update_company(&self, input: CompanyInput) -> Result<Company, OrdersError> {
        self.dispatch(
            &self.companies,
            "update_company",
            self.api.update_company(input),
            |op, item| SliceAction::UpdateFulfilled { op, item },
        )
        .await
    }

    pub async fn remove_company(&self, id: i64) -> Result<i64, OrdersError> {
        self.dispatch(
            &self.companies,
            "remove_company",
            self.api.remove_company(id),
            |op, id| SliceAction::RemoveFulfilled { op, id },
        )
        .await
    }

    pub fn clear_companies(&self) {
        self.companies.write().reduce(SliceAction::Clear);
    }

    // ===== Order types =====

    pub async fn fetch_order_types(&self) -> Result<Vec<OrderType>, OrdersError> {
        self.dispatch(
            &self.order_types,
            "fetch_order_types",
            self.api.fetch_order_types(),
            |op, items| SliceAction::FetchFulfilled { op, items },
        )
        .await
    }

    pub async fn create_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError> {
        self.dispatch(
            &self.order_types,
            "create_order_type",
            self.api.create_order_type(input),
            |op, item| SliceAction::CreateFulfilled { op, item },
        )
        .await
    }

    pub async fn update_order_type(&self, input: OrderTypeInput) -> Result<OrderType, OrdersError> {
        self.dispatch(
            &self.order_types,
            "update_order_type",
            self.api.update_order_type(input),
            |op, item| SliceAction::UpdateFulfilled { op, item },
        )
        .await
    }

    pub async fn remove_order_type(&self, id: i64) -> Result<i64, OrdersError> {
        self.dispatch(
            &self.order_types,
            "remove_order_type",
            self.api.remove_order_type(id),
            |op, id| SliceAction::RemoveFulfilled { op, id },
        )
        .await
    }

    pub fn clear_order_types(&self) {
        self.order_types.write().reduce(SliceAction::Clear);
    }

    // ===== Orders =====

    pub async fn fetch_orders(&self) -> Result<Vec<Order>, OrdersError> {
        self.dispatch(
            &self.orders,
            "fetch_orders",
            self.api.fetch_orders(),
            |op, items| OrderAction::Entity(SliceAction::FetchFulfilled { op, items }),
        )
        .await
    }

    pub async fn create_order(&self, input: OrderInput) -> Result<Order, OrdersError> {
        self.dispatch(
            &self.orders,
            "create_order",
            self.api.create_order(input),
            |op, item| OrderAction::Entity(SliceAction::CreateFulfilled { op, item }),
        )
        .await
    }

    pub async fn update_order(&self, input: OrderInput) -> Result<Order, OrdersError> {
        self.dispatch(
            &self.orders,
            "update_order",
            self.api.update_order(input),
            |op, item| OrderAction::Entity(SliceAction::UpdateFulfilled { op, item }),
        )
        .await
    }

    pub async fn remove_order(&self, id: &str) -> Result<String, OrdersError> {
        self.dispatch(
            &self.orders,
            "remove_order",
            self.api.remove_order(id),
            |op, id| OrderAction::Entity(SliceAction::RemoveFulfilled { op, id }),
        )
        .await
    }

    pub fn clear_orders(&self) {
        self.orders.write().reduce(OrderAction::Entity(SliceAction::Clear));
    }

    pub async fn fetch_order_counts_by_month(
        &self,
        query: OrderCountsQuery,
    ) -> Result<Vec<MonthlyOrderCount>, OrdersError> {
        self.dispatch(
            &self.orders,
            "fetch_order_counts_by_month",
            self.api.fetch_order_counts_by_month(query),
            |op, rows| OrderAction::CountsFulfilled { op, rows },
        )
        .await
    }

    // ===== Invoice =====

    /// Fetch one company's orders in range and render them as CSV
    pub async fn generate_invoice_csv(&self, query: OrderRangeQuery) -> Result<String, OrdersError> {
        let request = async {
            let orders = self.api.fetch_orders_by_company_and_range(query).await?;
            Ok::<_, OrdersError>(orders_to_csv(&orders)?)
        };
        self.dispatch(&self.invoice, "generate_invoice_csv", request, |op, csv| {
            InvoiceAction::Fulfilled { op, csv }
        })
        .await
    }

    // ===== Dispatch =====

    fn next_op(&self) -> OpId {
        self.next_op.fetch_add(1, Ordering::Relaxed)
    }

    async fn dispatch<S, T, F>(
        &self,
        slot: &RwLock<S>,
        operation: &'static str,
        request: F,
        fulfilled: impl FnOnce(OpId, T) -> S::Action,
    ) -> Result<T, OrdersError>
    where
        S: Reducer,
        T: Clone,
        F: Future<Output = Result<T, OrdersError>>,
    {
        let op = self.next_op();
        slot.write().reduce(S::pending(op));
        tracing::debug!(op, operation, "operation pending");

        let mut guard = Inflight {
            slot,
            op,
            operation,
            settled: false,
        };
        let result = request.await;
        guard.settled = true;

        match result {
            Ok(value) => {
                slot.write().reduce(fulfilled(op, value.clone()));
                Ok(value)
            }
            Err(error) => {
                tracing::debug!(op, operation, %error, "operation rejected");
                slot.write().reduce(S::rejected(op, error.to_string()));
                Err(error)
            }
        }
    }
}

/// Rejects its operation when the dispatch future is dropped before the
/// request settles
struct Inflight<'a, S: Reducer> {
    slot: &'a RwLock<S>,
    op: OpId,
    operation: &'static str,
    settled: bool,
}

impl<S: Reducer> Drop for Inflight<'_, S> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(op = self.op, operation = self.operation, "operation cancelled");
            self.slot
                .write()
                .reduce(S::rejected(self.op, OPERATION_CANCELLED.to_string()));
        }
    }
}
