//! Client-state layer
//!
//! Mirrors server data for a UI: one slice per entity plus an invoice slice,
//! each mutated only by its reducer.

pub mod invoice;
pub mod orders;
pub mod slice;
pub mod store;

pub use invoice::{InvoiceStatus, InvoiceView, INVOICE_SUCCESS_MESSAGE};
pub use orders::OrderView;
pub use slice::{Identified, OpId, SliceView};
pub use store::{Store, OPERATION_CANCELLED};
