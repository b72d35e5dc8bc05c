//! Read-only program content.

use axum::Json;
use domain::services::{program_overview, ProgramResponse};

/// The 4-week program: training days with targets, weekly schedule,
/// mobility circuits, cardio types, form limits and the guide.
///
/// GET /api/v1/program
pub async fn get_program() -> Json<ProgramResponse> {
    Json(program_overview())
}
