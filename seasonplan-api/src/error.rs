/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the right
/// status code with a JSON body.
///
/// Two deliberate collapses happen here, not in the domain layer:
/// `NotFound` and `Forbidden` both render as the same 404 "access denied"
/// body (so a caller can never probe which task ids exist), and store /
/// hashing failures render as a generic 500 with the detail only logged.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seasonplan_shared::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404) — also the shape of "access denied"
    NotFound(String),

    /// Conflict (409) - e.g., duplicate username
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert planner domain errors to API errors
impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::InvalidInput(msg) => {
                ApiError::ValidationError(vec![ValidationErrorDetail {
                    field: "_".to_string(),
                    message: msg,
                }])
            }
            PlannerError::PasswordMismatch => {
                ApiError::ValidationError(vec![ValidationErrorDetail {
                    field: "password_confirm".to_string(),
                    message: "Passwords do not match".to_string(),
                }])
            }
            PlannerError::EmptyContent => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "content".to_string(),
                message: "Task content must not be empty".to_string(),
            }]),
            PlannerError::DuplicateUsername => {
                ApiError::Conflict("Username already taken".to_string())
            }
            PlannerError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            PlannerError::Unauthenticated => {
                ApiError::Unauthorized("Please log in to continue".to_string())
            }
            // NotFound and Forbidden collapse into one indistinguishable
            // response: existence of other users' tasks never leaks.
            PlannerError::NotFound | PlannerError::Forbidden => {
                ApiError::NotFound("Access denied".to_string())
            }
            PlannerError::NothingToExport => {
                ApiError::NotFound("No tasks to export yet".to_string())
            }
            PlannerError::Store(e) => ApiError::InternalError(format!("Database error: {}", e)),
            PlannerError::Password(e) => {
                ApiError::InternalError(format!("Password operation failed: {}", e))
            }
        }
    }
}

/// Convert request-validation errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Access denied".to_string());
        assert_eq!(err.to_string(), "Not found: Access denied");
    }

    #[test]
    fn test_ownership_failures_collapse() {
        let not_found: ApiError = PlannerError::NotFound.into();
        let forbidden: ApiError = PlannerError::Forbidden.into();

        // Identical user-visible shape for both kinds
        match (&not_found, &forbidden) {
            (ApiError::NotFound(a), ApiError::NotFound(b)) => assert_eq!(a, b),
            other => panic!("expected NotFound for both, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_kinds_map_to_422() {
        for err in [
            PlannerError::InvalidInput("x".into()),
            PlannerError::PasswordMismatch,
            PlannerError::EmptyContent,
        ] {
            let api: ApiError = err.into();
            assert!(matches!(api, ApiError::ValidationError(_)));
        }
    }

    #[test]
    fn test_duplicate_username_maps_to_conflict() {
        let api: ApiError = PlannerError::DuplicateUsername.into();
        assert!(matches!(api, ApiError::Conflict(_)));
    }

    #[test]
    fn test_credential_failures_map_to_unauthorized() {
        let api: ApiError = PlannerError::InvalidCredentials.into();
        assert!(matches!(api, ApiError::Unauthorized(_)));

        let api: ApiError = PlannerError::Unauthenticated.into();
        assert!(matches!(api, ApiError::Unauthorized(_)));
    }
}
