//! Extractor for the user authenticated by [`require_user_auth`].
//!
//! [`require_user_auth`]: crate::middleware::user_auth::require_user_auth

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::middleware::user_auth::{UserAuth, NOT_LOGGED_IN};

#[async_trait]
impl<S> FromRequestParts<S> for UserAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAuth>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_auth_from_extensions() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts.extensions.insert(UserAuth {
            user_id: 3,
            session_id: 9,
        });

        let auth = UserAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth.user_id, 3);
        assert_eq!(auth.session_id, 9);
    }

    #[tokio::test]
    async fn test_missing_auth_is_unauthorized() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        match UserAuth::from_request_parts(&mut parts, &()).await {
            Err(ApiError::Unauthorized(msg)) => assert_eq!(msg, NOT_LOGGED_IN),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }
}
