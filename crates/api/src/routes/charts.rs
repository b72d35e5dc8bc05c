//! Chart data endpoints.
//!
//! Every series is an aggregation of the user's stored rows within the
//! optional date window; clients draw the charts.

use axum::{extract::State, Json};
use domain::models::{
    BodyMetric, CardioSession, ChartResponse, DateRangeQuery, ResistanceSet,
};
use domain::services::{body_metric_trends, cardio_summary, resistance_progress, resistance_volume};
use persistence::repositories::{BodyMetricRepository, CardioRepository, ResistanceRepository};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiQuery;
use crate::middleware::user_auth::UserAuth;

async fn load_sets(
    state: &AppState,
    user_id: i64,
    query: &DateRangeQuery,
) -> Result<Vec<ResistanceSet>, ApiError> {
    query.validate()?;
    let repo = ResistanceRepository::new(state.pool.clone());
    Ok(repo
        .list_sets(user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Heaviest set per date, one series per exercise.
///
/// GET /api/v1/charts/resistance
pub async fn resistance_chart(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let sets = load_sets(&state, auth.user_id, &query).await?;
    Ok(Json(ChartResponse {
        series: resistance_progress(&sets),
    }))
}

/// Total weight × reps per date.
///
/// GET /api/v1/charts/volume
pub async fn volume_chart(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let sets = load_sets(&state, auth.user_id, &query).await?;
    Ok(Json(ChartResponse {
        series: vec![resistance_volume(&sets)],
    }))
}

/// Minutes and duration-weighted average heart rate per date.
///
/// GET /api/v1/charts/cardio
pub async fn cardio_chart(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    query.validate()?;

    let repo = CardioRepository::new(state.pool.clone());
    let sessions: Vec<CardioSession> = repo
        .list_sessions(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ChartResponse {
        series: cardio_summary(&sessions),
    }))
}

/// Body weight and body-fat percentage per date.
///
/// GET /api/v1/charts/body-metrics
pub async fn body_metrics_chart(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    query.validate()?;

    let repo = BodyMetricRepository::new(state.pool.clone());
    let metrics: Vec<BodyMetric> = repo
        .list_metrics(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ChartResponse {
        series: body_metric_trends(&metrics),
    }))
}
