//! Body metric endpoints.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::body_metric::{
    BodyMetricResponse, CreateBodyMetricRequest, ListBodyMetricsResponse,
};
use domain::models::{BodyMetric, DateRangeQuery};
use persistence::repositories::{BodyMetricRepository, CreateBodyMetricInput};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::user_auth::UserAuth;

/// Record a dated set of measurements. Any subset may be given, but not none.
///
/// POST /api/v1/body-metrics
pub async fn create_metric(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<CreateBodyMetricRequest>,
) -> Result<(StatusCode, Json<BodyMetricResponse>), ApiError> {
    request.validate()?;

    let input = CreateBodyMetricInput {
        user_id: auth.user_id,
        date: request.date,
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        sex: request.sex,
        age: request.age,
        body_fat_percentage: request.body_fat_percentage,
    };

    let repo = BodyMetricRepository::new(state.pool.clone());
    let metric: BodyMetric = repo.create_metric(input).await?.into();

    tracing::info!(
        user_id = auth.user_id,
        metric_id = metric.id,
        date = %metric.date,
        "Body metrics saved"
    );

    Ok((StatusCode::CREATED, Json(metric.into())))
}

/// GET /api/v1/body-metrics?from=&to=
pub async fn list_metrics(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ListBodyMetricsResponse>, ApiError> {
    query.validate()?;

    let repo = BodyMetricRepository::new(state.pool.clone());
    let metrics: Vec<BodyMetric> = repo
        .list_metrics(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(metrics.into()))
}

/// DELETE /api/v1/body-metrics/:id
pub async fn delete_metric(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = BodyMetricRepository::new(state.pool.clone());
    if !repo.delete_metric(auth.user_id, id).await? {
        return Err(ApiError::NotFound("Body metric entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
