//! Generic entity slice: `{ items, loading, error }` driven by actions
//!
//! A slice only accepts a `fulfilled`/`rejected` action whose operation id it
//! saw in a `pending` action and has not settled yet. Settling removes the id,
//! so a replayed or unknown completion is ignored.

use crate::contract::{Company, Order, OrderType};
use std::collections::HashSet;

/// Unique id of one dispatched operation
pub type OpId = u64;

/// Entities that reducers can match by identity
pub trait Identified {
    type Id: PartialEq + Clone + Send + Sync + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

impl Identified for Company {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Identified for OrderType {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Identified for Order {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// State container updated only through [`Reducer::reduce`]
pub trait Reducer {
    type Action;

    fn pending(op: OpId) -> Self::Action;

    fn rejected(op: OpId, message: String) -> Self::Action;

    fn reduce(&mut self, action: Self::Action);
}

/// Actions accepted by an entity slice
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T: Identified> {
    Pending { op: OpId },
    FetchFulfilled { op: OpId, items: Vec<T> },
    CreateFulfilled { op: OpId, item: T },
    UpdateFulfilled { op: OpId, item: T },
    RemoveFulfilled { op: OpId, id: T::Id },
    Rejected { op: OpId, message: String },
    Clear,
}

/// `{ items, loading, error }` plus the set of unsettled operations
#[derive(Debug, Clone)]
pub struct Slice<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    in_flight: HashSet<OpId>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            in_flight: HashSet::new(),
        }
    }
}

/// Snapshot returned by selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for SliceView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Identified + Clone> Slice<T> {
    pub fn view(&self) -> SliceView<T> {
        SliceView {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn is_in_flight(&self, op: OpId) -> bool {
        self.in_flight.contains(&op)
    }

    /// Register a pending operation
    pub(crate) fn begin(&mut self, op: OpId) {
        self.in_flight.insert(op);
        self.loading = true;
        self.error = None;
    }

    /// Settle `op`; false when it was not in flight and must not write
    pub(crate) fn settle(&mut self, op: OpId) -> bool {
        if !self.in_flight.remove(&op) {
            tracing::debug!(op, "ignoring completion of unknown operation");
            return false;
        }
        self.loading = false;
        true
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}

impl<T: Identified + Clone> Reducer for Slice<T> {
    type Action = SliceAction<T>;

    fn pending(op: OpId) -> Self::Action {
        SliceAction::Pending { op }
    }

    fn rejected(op: OpId, message: String) -> Self::Action {
        SliceAction::Rejected { op, message }
    }

    fn reduce(&mut self, action: SliceAction<T>) {
        match action {
            SliceAction::Pending { op } => self.begin(op),
            SliceAction::FetchFulfilled { op, items } => {
                if self.settle(op) {
                    self.items = items;
                }
            }
            SliceAction::CreateFulfilled { op, item } => {
                if self.settle(op) {
                    self.items.push(item);
                }
            }
            SliceAction::UpdateFulfilled { op, item } => {
                if self.settle(op) {
                    if let Some(slot) = self.items.iter_mut().find(|e| e.id() == item.id()) {
                        *slot = item;
                    }
                }
            }
            SliceAction::RemoveFulfilled { op, id } => {
                if self.settle(op) {
                    self.items.retain(|e| *e.id() != id);
                }
            }
            SliceAction::Rejected { op, message } => {
                if self.settle(op) {
                    self.fail(message);
                }
            }
            SliceAction::Clear => {
                self.items.clear();
                self.error = None;
                self.loading = false;
            }
        }
    }
}
