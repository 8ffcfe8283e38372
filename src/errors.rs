use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::handlers::common::failure_alert_headers;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// A single constraint violation on a request body field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorDetail {
    #[schema(example = "employeeCode")]
    pub field: String,
    #[schema(example = "length")]
    pub message: String,
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "A new seller cannot already have an ID",
    "entityName": "seller",
    "errorKey": "idexists",
    "requestId": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Entity the failing request addressed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Machine-readable error key, e.g. `idexists` or `idnotfound`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
    /// Field-level validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorDetail>>,
    /// Unique request identifier for support and debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A rejected request tied to an entity and a machine-readable key.
    #[error("{message}")]
    BadRequestAlert {
        message: String,
        entity_name: String,
        error_key: String,
    },

    /// The row is still referenced by others.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl ServiceError {
    pub fn bad_request_alert(
        message: impl Into<String>,
        entity_name: impl Into<String>,
        error_key: impl Into<String>,
    ) -> Self {
        ServiceError::BadRequestAlert {
            message: message.into(),
            entity_name: entity_name.into(),
            error_key: error_key.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::BadRequestAlert { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::SerializationError(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::SerializationError(_) | Self::InternalError(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    fn alert(&self) -> Option<(&str, &str)> {
        match self {
            Self::BadRequestAlert {
                entity_name,
                error_key,
                ..
            } => Some((entity_name.as_str(), error_key.as_str())),
            _ => None,
        }
    }
}

fn error_response(
    status: StatusCode,
    message: String,
    alert: Option<(&str, &str)>,
    details: Option<Vec<FieldErrorDetail>>,
) -> Response {
    let headers = alert
        .map(|(entity, key)| failure_alert_headers(entity, key))
        .unwrap_or_else(HeaderMap::new);

    let body = ErrorResponse {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message,
        entity_name: alert.map(|(entity, _)| entity.to_string()),
        error_key: alert.map(|(_, key)| key.to_string()),
        details,
        request_id: current_request_id(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (status, headers, Json(body)).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        error_response(status, self.response_message(), self.alert(), None)
    }
}

/// API Error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Vec<FieldErrorDetail>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        entity_name: String,
        error_key: String,
    },

    #[error("Method not allowed: {message}")]
    MethodNotAllowed { message: String },

    /// The request body could not be read as the expected JSON document.
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl ApiError {
    pub fn bad_request(
        message: impl Into<String>,
        entity_name: impl Into<String>,
        error_key: impl Into<String>,
    ) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            entity_name: entity_name.into(),
            error_key: error_key.into(),
        }
    }

    /// The machine-readable key carried by this error, if any
    pub fn error_key(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { error_key, .. } => Some(error_key),
            ApiError::ServiceError(err) => err.alert().map(|(_, key)| key),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldErrorDetail> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldErrorDetail {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError {
            message: "Method argument not valid".to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ServiceError(err) => err.into_response(),
            ApiError::ValidationError { message, details } => {
                error_response(StatusCode::BAD_REQUEST, message, None, Some(details))
            }
            ApiError::NotFound(message) => {
                error_response(StatusCode::NOT_FOUND, message, None, None)
            }
            ApiError::BadRequest {
                message,
                entity_name,
                error_key,
            } => error_response(
                StatusCode::BAD_REQUEST,
                message,
                Some((&entity_name, &error_key)),
                None,
            ),
            ApiError::MethodNotAllowed { message } => {
                error_response(StatusCode::METHOD_NOT_ALLOWED, message, None, None)
            }
            ApiError::InvalidBody { status, message } => error_response(status, message, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::NotFound("missing".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
    }

    #[tokio::test]
    async fn bad_request_carries_alert_headers_and_key() {
        let response = ApiError::bad_request("Invalid id", "seller", "idnull").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["x-salestrackingapp-error"],
            "error.idnull"
        );
        assert_eq!(response.headers()["x-salestrackingapp-params"], "seller");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error_key.as_deref(), Some("idnull"));
        assert_eq!(payload.entity_name.as_deref(), Some("seller"));
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3))]
        name: String,
        #[validate(range(min = 1))]
        quantity: i32,
    }

    #[tokio::test]
    async fn validation_errors_list_each_field() {
        let errors = Sample {
            name: "toolong".into(),
            quantity: 0,
        }
        .validate()
        .unwrap_err();

        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        let fields: Vec<_> = payload
            .details
            .unwrap()
            .into_iter()
            .map(|d| d.field)
            .collect();
        assert_eq!(fields, vec!["name", "quantity"]);
    }

    #[test]
    fn service_error_status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::bad_request_alert("x", "sale", "idinvalid").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Conflict("seller 1 is still referenced".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("password=secret".into()))
                .response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::NotFound("Seller 4 not found".into()).response_message(),
            "Not found: Seller 4 not found"
        );
    }
}
