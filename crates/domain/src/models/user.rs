//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: String,
}

/// Represents an active login session.
///
/// Only SHA-256 digests of the token ids are stored, never the tokens.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub id: i64,
    pub user_id: i64,
    pub access_jti_hash: String,
    pub refresh_jti_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl UserSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            username: "aggelos".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"username\":\"aggelos\""));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = UserSession {
            id: 1,
            user_id: 1,
            access_jti_hash: "a".repeat(64),
            refresh_jti_hash: "b".repeat(64),
            expires_at: now + Duration::minutes(5),
            created_at: now,
            last_used_at: now,
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::minutes(5)));
    }
}
