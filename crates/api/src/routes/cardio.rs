//! Cardio log endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use domain::models::cardio::{CardioSessionResponse, CreateCardioRequest, ListCardioResponse};
use domain::models::{CardioSession, DateRangeQuery};
use persistence::repositories::{CardioRepository, CreateCardioInput};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::metrics::record_workout_logged;
use crate::middleware::user_auth::UserAuth;

/// POST /api/v1/cardio
pub async fn create_session(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<CreateCardioRequest>,
) -> Result<(StatusCode, Json<CardioSessionResponse>), ApiError> {
    request.validate()?;

    let input = CreateCardioInput {
        user_id: auth.user_id,
        date: request.date.unwrap_or_else(|| Local::now().date_naive()),
        cardio_type: request.cardio_type,
        duration_min: request.duration_min,
        avg_hr: request.avg_hr,
    };

    let repo = CardioRepository::new(state.pool.clone());
    let session: CardioSession = repo.create_session(input).await?.into();

    record_workout_logged("cardio", 1);
    tracing::info!(
        user_id = auth.user_id,
        session_id = session.id,
        cardio_type = %session.cardio_type,
        duration_min = session.duration_min,
        "Cardio session saved"
    );

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /api/v1/cardio?from=&to=
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ListCardioResponse>, ApiError> {
    query.validate()?;

    let repo = CardioRepository::new(state.pool.clone());
    let sessions: Vec<CardioSession> = repo
        .list_sessions(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(sessions.into()))
}

/// DELETE /api/v1/cardio/:id
pub async fn delete_session(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = CardioRepository::new(state.pool.clone());
    if !repo.delete_session(auth.user_id, id).await? {
        return Err(ApiError::NotFound("Cardio session not found".to_string()));
    }

    tracing::info!(user_id = auth.user_id, session_id = id, "Cardio session deleted");
    Ok(StatusCode::NO_CONTENT)
}
