//! User JWT authentication middleware.
//!
//! A request is authenticated when its Bearer access token verifies and the
//! session it was issued for still exists. Logging out deletes the session,
//! which revokes access tokens that have not expired yet.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use domain::models::UserSession;
use persistence::repositories::SessionRepository;
use shared::crypto::sha256_hex;
use shared::jwt::{extract_user_id, JwtConfig};

use crate::app::AppState;
use crate::error::ApiError;

/// Message returned whenever no valid session backs the request.
pub const NOT_LOGGED_IN: &str = "User not logged in";

/// Authenticated user information, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: i64,
    /// Session the access token belongs to.
    pub session_id: i64,
}

impl UserAuth {
    /// Validates an access token and returns the user id and token id.
    pub fn validate_token(jwt_config: &JwtConfig, token: &str) -> Result<(i64, String), String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id = extract_user_id(&claims).map_err(|_| "Invalid user ID in token".to_string())?;

        Ok((user_id, claims.jti))
    }
}

/// Returns the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires a logged-in user.
///
/// Rejects the request with 401 when the token is missing or invalid, or when
/// its session has ended.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        return ApiError::Unauthorized(NOT_LOGGED_IN.into()).into_response();
    };

    let jwt_config = match state.config.jwt.jwt_config() {
        Ok(config) => config,
        Err(e) => {
            return ApiError::Internal(format!("Failed to create JWT config: {}", e))
                .into_response();
        }
    };

    let (user_id, jti) = match UserAuth::validate_token(&jwt_config, token) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            return ApiError::Unauthorized("Invalid or expired token".into()).into_response();
        }
    };

    let sessions = SessionRepository::new(state.pool.clone());
    let session: Option<UserSession> = match sessions.find_by_access_hash(&sha256_hex(&jti)).await
    {
        Ok(found) => found.map(Into::into),
        Err(e) => return ApiError::from(e).into_response(),
    };

    match session {
        Some(session) if session.user_id == user_id && !session.is_expired(Utc::now()) => {
            req.extensions_mut().insert(UserAuth {
                user_id,
                session_id: session.id,
            });
            next.run(req).await
        }
        _ => {
            tracing::debug!(user_id, "No live session for access token");
            ApiError::Unauthorized(NOT_LOGGED_IN.into()).into_response()
        }
    }
}
