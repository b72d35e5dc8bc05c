//! Login rate limiting.
//!
//! Each username gets its own token bucket, so repeated guesses against one
//! account are throttled without affecting other users.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use serde::Deserialize;
use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Login bodies larger than this are rejected with a 400 before the handler runs.
const MAX_LOGIN_BODY_BYTES: usize = 16 * 1024;

/// Number of checks between sweeps of idle keys.
const SWEEP_INTERVAL: u64 = 1024;

type KeyedLimiter<C> =
    RateLimiter<String, DefaultKeyedStateStore<String>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Per-key buckets shared across requests.
///
/// Keys whose bucket has refilled are indistinguishable from unseen keys, so
/// they are dropped every [`SWEEP_INTERVAL`] checks. Memory is bounded by the
/// number of usernames tried within the last minute.
pub struct RateLimiterState<C: Clock = DefaultClock> {
    limiter: KeyedLimiter<C>,
    per_minute: u32,
    checks: AtomicU64,
}

impl RateLimiterState {
    /// Creates limiter state allowing `per_minute` attempts per key.
    pub fn new(per_minute: u32) -> Self {
        Self::with_clock(per_minute, DefaultClock::default())
    }
}

impl<C: Clock> RateLimiterState<C> {
    pub fn with_clock(per_minute: u32, clock: C) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN));
        Self {
            limiter: RateLimiter::new(quota, DefaultKeyedStateStore::default(), clock),
            per_minute,
            checks: AtomicU64::new(0),
        }
    }

    /// Returns `Err(retry_after_secs)` once the key has used up its quota.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let seen = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % SWEEP_INTERVAL == 0 {
            self.sweep();
        }

        self.limiter.check_key(&key.to_string()).map_err(|not_until| {
            let wait = not_until.wait_time_from(self.limiter.clock().now());
            wait.as_secs().max(1)
        })
    }

    /// Drops keys whose bucket has fully refilled.
    pub fn sweep(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        tracing::trace!(active_keys = self.limiter.len(), "Swept login rate limiter");
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

impl<C: Clock> std::fmt::Debug for RateLimiterState<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("per_minute", &self.per_minute)
            .field("active_keys", &self.len())
            .finish()
    }
}

#[derive(Deserialize)]
struct LoginKey {
    username: String,
}

/// Middleware for the login route, keyed by the submitted username.
///
/// Bodies that do not carry a username are left for the handler to reject.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_LOGIN_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return ApiError::Validation("Request body too large".into()).into_response(),
    };

    if let Ok(LoginKey { username }) = serde_json::from_slice::<LoginKey>(&bytes) {
        if let Err(retry_after) = state.login_limiter.check(username.trim()) {
            tracing::warn!(username = %username.trim(), retry_after, "Login rate limit exceeded");
            return ApiError::RateLimited(retry_after).into_response();
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
