//! Authentication service for registration, login and session management.
//!
//! Each login creates one row in `user_sessions` holding SHA-256 digests of
//! the access and refresh token ids. Refreshing rotates both digests in place;
//! logging out deletes the row.

use chrono::{Duration, Utc};
use domain::models::User;
use persistence::repositories::{SessionRepository, UserRepository};
use persistence::schema;
use shared::crypto::sha256_hex;
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use shared::password::{hash_password, needs_rehash, verify_password, PasswordError};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::config::JwtAuthConfig;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Session not found")]
    SessionNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Token pair with metadata.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub access_token_jti: String,
    pub refresh_token: String,
    pub refresh_token_jti: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub tokens: TokenPair,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    /// Creates a new AuthService with the given database pool and JWT configuration.
    pub fn new(pool: SqlitePool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            jwt_config: jwt_config.jwt_config()?,
        })
    }

    /// Register a new user and log them in.
    ///
    /// Log rows left without an owner by an older database are handed to the
    /// first account once it exists.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResult, AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(password)?;

        let user: User = match self.users.create_user(username, &password_hash).await {
            Ok(entity) => entity.into(),
            // Lost a race with a concurrent registration
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(AuthError::UsernameTaken);
            }
            Err(e) => return Err(e.into()),
        };

        let assigned = schema::assign_orphaned_logs(self.users.pool()).await?;
        if assigned > 0 {
            tracing::info!(user_id = user.id, rows = assigned, "Assigned orphaned log rows");
        }

        let tokens = self.start_session(user.id).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(AuthResult { user, tokens })
    }

    /// Login with username and password.
    ///
    /// A stored hash in the legacy digest format is replaced with an Argon2id
    /// hash once the password has been verified.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user: User = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?
            .into();

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if needs_rehash(&user.password_hash) {
            let upgraded = hash_password(password)?;
            self.users.update_password_hash(user.id, &upgraded).await?;
            tracing::info!(user_id = user.id, "Upgraded legacy password hash");
        }

        let expired = self.sessions.delete_expired_sessions(user.id).await?;
        if expired > 0 {
            tracing::debug!(user_id = user.id, sessions = expired, "Removed expired sessions");
        }

        let tokens = self.start_session(user.id).await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(AuthResult { user, tokens })
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The old pair stops working: both token ids in the session are replaced.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .jwt_config
            .validate_refresh_token(refresh_token)
            .map_err(|e| match e {
                JwtError::TokenExpired | JwtError::InvalidToken => AuthError::InvalidRefreshToken,
                _ => AuthError::TokenError(e),
            })?;

        let user_id = extract_user_id(&claims).map_err(|_| AuthError::InvalidRefreshToken)?;

        let session = self
            .sessions
            .find_by_refresh_hash(&sha256_hex(&claims.jti))
            .await?
            .filter(|s| s.user_id == user_id)
            .ok_or(AuthError::SessionNotFound)?;

        if session.expires_at <= Utc::now() {
            self.sessions.delete_session(session.id).await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let tokens = self.generate_tokens(user_id)?;
        let rotated = self
            .sessions
            .rotate_session(
                session.id,
                &sha256_hex(&tokens.access_token_jti),
                &sha256_hex(&tokens.refresh_token_jti),
                self.session_expiry(),
            )
            .await?;

        if !rotated {
            // Logged out between the lookup and the update
            return Err(AuthError::SessionNotFound);
        }

        tracing::debug!(user_id, session_id = session.id, "Session refreshed");
        Ok(tokens)
    }

    /// End the given session. Ending an already-ended session is not an error.
    pub async fn logout(&self, session_id: i64) -> Result<(), AuthError> {
        if !self.sessions.delete_session(session_id).await? {
            tracing::debug!(session_id, "Session not found during logout");
        }
        Ok(())
    }

    /// Look up the user behind an authenticated request.
    pub async fn current_user(&self, user_id: i64) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or(AuthError::UserNotFound)
    }

    /// Replace the password after checking the current one.
    ///
    /// Every other session of the user is ended; the calling session stays.
    pub async fn change_password(
        &self,
        user_id: i64,
        session_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self.current_user(user_id).await?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = hash_password(new_password)?;
        if !self.users.update_password_hash(user_id, &password_hash).await? {
            return Err(AuthError::UserNotFound);
        }

        let ended = self.sessions.delete_other_sessions(user_id, session_id).await?;
        tracing::info!(user_id, other_sessions_ended = ended, "Password changed");
        Ok(())
    }

    /// Generate access and refresh tokens for a user.
    fn generate_tokens(&self, user_id: i64) -> Result<TokenPair, AuthError> {
        let (access_token, access_jti) = self.jwt_config.generate_access_token(user_id)?;
        let (refresh_token, refresh_jti) = self.jwt_config.generate_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            access_token_jti: access_jti,
            refresh_token,
            refresh_token_jti: refresh_jti,
            expires_in: self.jwt_config.access_token_expiry_secs,
        })
    }

    fn session_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::seconds(self.jwt_config.refresh_token_expiry_secs)
    }

    /// Issue tokens and record the session they belong to.
    async fn start_session(&self, user_id: i64) -> Result<TokenPair, AuthError> {
        let tokens = self.generate_tokens(user_id)?;

        self.sessions
            .create_session(
                user_id,
                &sha256_hex(&tokens.access_token_jti),
                &sha256_hex(&tokens.refresh_token_jti),
                self.session_expiry(),
            )
            .await?;

        Ok(tokens)
    }
}
