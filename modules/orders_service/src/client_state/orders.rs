//! Order slice: the entity slice plus the monthly counts report

use super::slice::{OpId, Reducer, Slice, SliceAction, SliceView};
use crate::contract::{MonthlyOrderCount, Order};

/// Actions accepted by the order slice
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Entity(SliceAction<Order>),
    CountsFulfilled {
        op: OpId,
        rows: Vec<MonthlyOrderCount>,
    },
}

impl From<SliceAction<Order>> for OrderAction {
    fn from(action: SliceAction<Order>) -> Self {
        Self::Entity(action)
    }
}

/// Orders and counts share one `loading`/`error` pair
#[derive(Debug, Clone, Default)]
pub struct OrderSlice {
    orders: Slice<Order>,
    counts_by_month: Vec<MonthlyOrderCount>,
}

/// Selector output of the order slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderView {
    pub items: Vec<Order>,
    pub loading: bool,
    pub error: Option<String>,
    pub counts_by_month: Vec<MonthlyOrderCount>,
}

impl OrderSlice {
    pub fn view(&self) -> OrderView {
        let SliceView {
            items,
            loading,
            error,
        } = self.orders.view();
        OrderView {
            items,
            loading,
            error,
            counts_by_month: self.counts_by_month.clone(),
        }
    }
}

impl Reducer for OrderSlice {
    type Action = OrderAction;

    fn pending(op: OpId) -> OrderAction {
        OrderAction::Entity(SliceAction::Pending { op })
    }

    fn rejected(op: OpId, message: String) -> OrderAction {
        OrderAction::Entity(SliceAction::Rejected { op, message })
    }

    fn reduce(&mut self, action: OrderAction) {
        match action {
            OrderAction::Entity(action) => self.orders.reduce(action),
            OrderAction::CountsFulfilled { op, rows } => {
                if self.orders.settle(op) {
                    self.counts_by_month = rows;
                }
            }
        }
    }
}
