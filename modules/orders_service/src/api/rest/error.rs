//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::{OrdersError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Offending fields, for validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            fields: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<OrdersError> for Problem {
    fn from(error: OrdersError) -> Self {
        map_domain_error(error)
    }
}

impl From<ValidationError> for Problem {
    fn from(error: ValidationError) -> Self {
        map_domain_error(OrdersError::Validation(error))
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: OrdersError) -> Problem {
    let detail = error.to_string();
    match error {
        OrdersError::Validation(validation) => {
            let fields = validation
                .violations
                .iter()
                .map(|v| v.field.to_string())
                .collect();
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(detail)
                .with_fields(fields)
        }

        OrdersError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found").with_detail(detail)
        }

        // Store details are already logged by the service
        OrdersError::Database { .. } => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error").with_detail(detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Resource;

    #[test]
    fn test_status_per_error_kind() {
        let validation = map_domain_error(ValidationError::single("Name", "empty").into());
        assert_eq!(validation.status, 400);
        assert_eq!(validation.fields, vec!["Name".to_string()]);

        let missing = map_domain_error(OrdersError::not_found(Resource::Company, 7));
        assert_eq!(missing.status, 404);
        assert_eq!(missing.detail.as_deref(), Some("No company found with Id: 7"));

        let store = map_domain_error(OrdersError::database("Error fetching order: boom"));
        assert_eq!(store.status, 500);
    }
}
