//! Resistance training log endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use domain::models::resistance::{
    CreateResistanceRequest, LastSetQuery, LastSetResponse, ListResistanceResponse,
};
use domain::models::{DateRangeQuery, ResistanceSet};
use domain::services::find_exercise;
use persistence::repositories::ResistanceRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::metrics::record_workout_logged;
use crate::middleware::user_auth::UserAuth;

/// Save the sets performed for one exercise.
///
/// All sets are written in one transaction. The stored target comes from the
/// program for the given day and exercise.
///
/// POST /api/v1/resistance
pub async fn create_sets(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<CreateResistanceRequest>,
) -> Result<(StatusCode, Json<ListResistanceResponse>), ApiError> {
    if request.sets.is_empty() {
        return Err(ApiError::Validation("No data to save.".to_string()));
    }
    request.validate()?;

    let program_exercise = find_exercise(&request.day, &request.exercise).ok_or_else(|| {
        ApiError::Validation(format!(
            "'{}' is not part of the {} program",
            request.exercise, request.day
        ))
    })?;

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let rows = request.into_new_sets(date, program_exercise.target);

    let repo = ResistanceRepository::new(state.pool.clone());
    let saved: Vec<ResistanceSet> = repo
        .insert_sets(auth.user_id, &rows)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    record_workout_logged("resistance", saved.len());
    tracing::info!(
        user_id = auth.user_id,
        exercise = %program_exercise.exercise,
        %date,
        sets = saved.len(),
        "Resistance sets saved"
    );

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// List logged sets, newest first.
///
/// GET /api/v1/resistance?from=&to=
pub async fn list_sets(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<ListResistanceResponse>, ApiError> {
    query.validate()?;

    let repo = ResistanceRepository::new(state.pool.clone());
    let sets: Vec<ResistanceSet> = repo
        .list_sets(auth.user_id, query.from, query.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(sets.into()))
}

/// Most recent weight, reps and RIR for an exercise and set number, used to
/// pre-fill the form. Every field is null when nothing was logged yet.
///
/// GET /api/v1/resistance/last?exercise=&setNumber=
pub async fn last_set(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiQuery(query): ApiQuery<LastSetQuery>,
) -> Result<Json<LastSetResponse>, ApiError> {
    query.validate()?;

    let repo = ResistanceRepository::new(state.pool.clone());
    let last = repo
        .find_last_set(auth.user_id, &query.exercise, query.set_number)
        .await?
        .map(ResistanceSet::from);

    Ok(Json(last.into()))
}

/// Delete one of the user's sets.
///
/// DELETE /api/v1/resistance/:id
pub async fn delete_set(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ResistanceRepository::new(state.pool.clone());
    if !repo.delete_set(auth.user_id, id).await? {
        return Err(ApiError::NotFound("Set not found".to_string()));
    }

    tracing::info!(user_id = auth.user_id, set_id = id, "Resistance set deleted");
    Ok(StatusCode::NO_CONTENT)
}
