//! Invoice CSV slice

use super::slice::{OpId, Reducer};
use std::collections::HashSet;

/// Message stored after a successful export
pub const INVOICE_SUCCESS_MESSAGE: &str = "Invoice CSV generated successfully";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvoiceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceAction {
    Pending { op: OpId },
    Fulfilled { op: OpId, csv: String },
    Rejected { op: OpId, message: String },
}

/// Selector output of the invoice slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceView {
    pub status: InvoiceStatus,
    pub message: String,
    pub error: Option<String>,
    pub csv_content: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceSlice {
    state: InvoiceView,
    in_flight: HashSet<OpId>,
}

impl InvoiceSlice {
    pub fn view(&self) -> InvoiceView {
        self.state.clone()
    }
}

impl Reducer for InvoiceSlice {
    type Action = InvoiceAction;

    fn pending(op: OpId) -> InvoiceAction {
        InvoiceAction::Pending { op }
    }

    fn rejected(op: OpId, message: String) -> InvoiceAction {
        InvoiceAction::Rejected { op, message }
    }

    fn reduce(&mut self, action: InvoiceAction) {
        match action {
            InvoiceAction::Pending { op } => {
                self.in_flight.insert(op);
                self.state.status = InvoiceStatus::Loading;
                self.state.error = None;
            }
            InvoiceAction::Fulfilled { op, csv } => {
                if self.in_flight.remove(&op) {
                    self.state.status = InvoiceStatus::Succeeded;
                    self.state.message = INVOICE_SUCCESS_MESSAGE.to_string();
                    self.state.csv_content = Some(csv);
                }
            }
            InvoiceAction::Rejected { op, message } => {
                if self.in_flight.remove(&op) {
                    self.state.status = InvoiceStatus::Failed;
                    self.state.error = Some(message);
                }
            }
        }
    }
}
