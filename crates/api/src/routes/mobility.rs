//! Mobility log endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use domain::models::mobility::{CreateMobilityRequest, ListMobilityResponse, MobilitySessionResponse};
use domain::models::{DateRangeQuery, MobilitySession};
use persistence::repositories::{CreateMobilityInput, MobilityRepository};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::metrics::record_workout_logged;
use crate::middleware::user_auth::UserAuth;

/// Log which mobility circuits were completed.
///
/// POST /api/v1/mobility
pub async fn create_session(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<CreateMobilityRequest>,
) -> Result<(StatusCode, Json<MobilitySessionResponse>), ApiError> {
    request.validate()?;

    let input = CreateMobilityInput {
        user_id: auth.user_id,
        date: request.date.unwrap_or_else(|| Local::now().date_naive()),
        prep_done: request.prep_done,
        joint_flow_done: request.joint_flow_done,
        animal_circuit_done: request.animal_circuit_done,
        cuff_finisher_done: request.cuff_finisher_done,
    };

    let repo = MobilityRepository::new(state.pool.clone());
    let session: MobilitySession = repo.create_session(input).await?.into();

    record_workout_logged("mobility", 1);
    tracing::info!(
        user_id = auth.user_id,
        session_id = session.id,
        circuits = session.completed_circuits(),
        "Mobility session saved"
    );

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// List mobility sessions, newest first.
///
/// GET /api/v1/mobility?from=&to=
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ListMobilityResponse>, ApiError> {
    query.validate()?;

    let repo = MobilityRepository::new(state.pool.clone());
    let sessions: Vec<MobilitySession> = repo
        .list_sessions(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(sessions.into()))
}

/// DELETE /api/v1/mobility/:id
pub async fn delete_session(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = MobilityRepository::new(state.pool.clone());
    if !repo.delete_session(auth.user_id, id).await? {
        return Err(ApiError::NotFound("Mobility session not found".to_string()));
    }

    tracing::info!(user_id = auth.user_id, session_id = id, "Mobility session deleted");
    Ok(StatusCode::NO_CONTENT)
}
