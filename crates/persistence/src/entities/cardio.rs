//! Cardio session entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{CardioSession, CardioType};

/// Database row mapping for the cardio table.
///
/// The `type` column holds the display label; queries alias it to
/// `cardio_type`.
#[derive(Debug, Clone, FromRow)]
pub struct CardioEntity {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub cardio_type: String,
    pub duration_min: i32,
    pub avg_hr: i32,
}

impl From<CardioEntity> for CardioSession {
    fn from(entity: CardioEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            cardio_type: CardioType::from_str(&entity.cardio_type).unwrap_or(CardioType::Other),
            duration_min: entity.duration_min,
            avg_hr: entity.avg_hr,
        }
    }
}
