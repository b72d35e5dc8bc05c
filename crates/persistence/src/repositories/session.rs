//! Session repository for login sessions.
//!
//! Sessions are looked up by the SHA-256 digest of a token's `jti`.
//! Expiry is checked by the caller against `expires_at`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::entities::UserSessionEntity;
use crate::metrics::QueryTimer;

const SESSION_COLUMNS: &str =
    "id, user_id, access_jti_hash, refresh_jti_hash, expires_at, created_at, last_used_at";

/// Repository for user session operations.
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session.
    pub async fn create_session(
        &self,
        user_id: i64,
        access_jti_hash: &str,
        refresh_jti_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let now = Utc::now();
        let timer = QueryTimer::new("create_user_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(&format!(
            r#"
            INSERT INTO user_sessions
                (user_id, access_jti_hash, refresh_jti_hash, expires_at, created_at, last_used_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(user_id)
        .bind(access_jti_hash)
        .bind(refresh_jti_hash)
        .bind(expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a session by the digest of its access token id.
    pub async fn find_by_access_hash(
        &self,
        access_jti_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_access_hash");
        let result = sqlx::query_as::<_, UserSessionEntity>(&format!(
            "SELECT {} FROM user_sessions WHERE access_jti_hash = ?1",
            SESSION_COLUMNS
        ))
        .bind(access_jti_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a session by the digest of its refresh token id.
    pub async fn find_by_refresh_hash(
        &self,
        refresh_jti_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_refresh_hash");
        let result = sqlx::query_as::<_, UserSessionEntity>(&format!(
            "SELECT {} FROM user_sessions WHERE refresh_jti_hash = ?1",
            SESSION_COLUMNS
        ))
        .bind(refresh_jti_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a session's token digests after a refresh.
    pub async fn rotate_session(
        &self,
        session_id: i64,
        access_jti_hash: &str,
        refresh_jti_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("rotate_user_session");
        let result = sqlx::query(
            r#"
            UPDATE user_sessions
            SET access_jti_hash = ?1, refresh_jti_hash = ?2, expires_at = ?3, last_used_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(access_jti_hash)
        .bind(refresh_jti_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .bind(session_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Delete a single session (logout).
    pub async fn delete_session(&self, session_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_user_session");
        let result = sqlx::query("DELETE FROM user_sessions WHERE id = ?1")
            .bind(session_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Delete every session of a user except one. Returns the number removed.
    pub async fn delete_other_sessions(
        &self,
        user_id: i64,
        keep_session_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_other_user_sessions");
        let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = ?1 AND id != ?2")
            .bind(user_id)
            .bind(keep_session_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete sessions whose expiry has passed.
    pub async fn delete_expired_sessions(&self, user_id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_user_sessions");
        let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = ?1 AND expires_at <= ?2")
            .bind(user_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
