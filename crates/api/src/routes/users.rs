//! Routes for the logged-in user's account.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::middleware::user_auth::UserAuth;
use crate::routes::auth::UserResponse;
use crate::services::auth::{AuthError, AuthService};

/// Request body for changing the password.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub new_password: String,
}

/// Get the current user.
///
/// GET /api/v1/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    let user = auth_service.current_user(auth.user_id).await?;
    Ok(Json(user.into()))
}

/// Change the current user's password.
///
/// Other sessions are logged out; the calling session stays valid.
///
/// PUT /api/v1/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), &state.config.jwt)?;
    auth_service
        .change_password(
            auth.user_id,
            auth.session_id,
            &request.current_password,
            &request.new_password,
        )
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Current password is incorrect".to_string())
            }
            other => other.into(),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
