//! Contract error types for orders service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use std::fmt;

/// Entity kinds handled by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Company,
    OrderType,
    Order,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Company => "company",
            Self::OrderType => "order type",
            Self::Order => "order",
        })
    }
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field (e.g. `Id`, `Price`)
    pub field: &'static str,
    pub message: String,
}

/// Every field violation found in one input
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether `field` is among the violations
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Orders service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrdersError {
    /// Input rejected before any query was issued
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Update or delete matched no row
    #[error("No {resource} found with Id: {id}")]
    NotFound {
        resource: Resource,
        id: String,
    },

    /// Store or transport failure, insert conflicts included
    #[error("Database error: {message}")]
    Database {
        message: String,
    },
}

impl OrdersError {
    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
