use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    login_rate_limit, metrics_handler, metrics_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    auth, body_metrics, cardio, charts, health, mobility, program, resistance, users,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub login_limiter: Arc<RateLimiterState>,
}

pub fn create_app(config: Config, pool: SqlitePool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        login_limiter: Arc::new(RateLimiterState::new(
            config.security.login_attempts_per_minute,
        )),
    };

    // An empty origin list allows any origin (development)
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/program", get(program::get_program));

    let login_routes = Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Everything below needs a live session
    let user_routes = Router::new()
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/users/me", get(users::get_current_user))
        .route("/api/v1/users/me/password", put(users::change_password))
        .route(
            "/api/v1/resistance",
            post(resistance::create_sets).get(resistance::list_sets),
        )
        .route("/api/v1/resistance/last", get(resistance::last_set))
        .route("/api/v1/resistance/:id", delete(resistance::delete_set))
        .route(
            "/api/v1/mobility",
            post(mobility::create_session).get(mobility::list_sessions),
        )
        .route("/api/v1/mobility/:id", delete(mobility::delete_session))
        .route(
            "/api/v1/cardio",
            post(cardio::create_session).get(cardio::list_sessions),
        )
        .route("/api/v1/cardio/:id", delete(cardio::delete_session))
        .route(
            "/api/v1/body-metrics",
            post(body_metrics::create_metric).get(body_metrics::list_metrics),
        )
        .route(
            "/api/v1/body-metrics/:id",
            delete(body_metrics::delete_metric),
        )
        .route("/api/v1/charts/resistance", get(charts::resistance_chart))
        .route("/api/v1/charts/volume", get(charts::volume_chart))
        .route("/api/v1/charts/cardio", get(charts::cardio_chart))
        .route(
            "/api/v1/charts/body-metrics",
            get(charts::body_metrics_chart),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(login_routes)
        .merge(user_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
