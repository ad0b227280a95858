/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Logout
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create a new account
/// - `POST /v1/auth/login` - Start a session, returning its token
/// - `POST /v1/auth/logout` - End the session (idempotent)
use crate::{
    app::{AppState, SessionToken},
    error::ApiResult,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired login name
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters"))]
    pub username: String,

    /// Password (any non-empty string; hashing happens server-side)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    /// Password confirmation; must match `password`
    pub password_confirm: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Newly created user ID
    pub user_id: Uuid,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque session token; send as `Authorization: Bearer <token>`
    pub token: String,

    /// Authenticated user ID
    pub user_id: Uuid,

    /// Username for display
    pub username: String,
}

/// Register a new account
///
/// Registration does not log the user in; the client proceeds to the
/// login form on success.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "secret123", "password_confirm": "secret123" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username already taken
/// - `422 Unprocessable Entity`: Missing field or password mismatch
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    let user_id = state
        .planner
        .register(&req.username, &req.password, &req.password_confirm)
        .await?;

    Ok(Json(RegisterResponse { user_id }))
}

/// Login, starting a new session
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "secret123" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password (the response
///   never says which)
/// - `422 Unprocessable Entity`: Missing field
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let session = state.planner.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        user_id: session.user_id,
        username: session.username,
    }))
}

/// Logout, ending the session
///
/// Idempotent: logging out with an unknown or already-ended token still
/// returns 204.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/logout
/// Authorization: Bearer <token>
/// ```
pub async fn logout(State(state): State<AppState>, token: SessionToken) -> StatusCode {
    state.planner.logout(&token.0);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_username = RegisterRequest {
            username: "".to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let long_username = RegisterRequest {
            username: "a".repeat(81),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
        };
        assert!(long_username.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = LoginRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }
}
