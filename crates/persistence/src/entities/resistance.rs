//! Resistance set entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::ResistanceSet;

/// Database row mapping for the resistance table.
#[derive(Debug, Clone, FromRow)]
pub struct ResistanceEntity {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub week: i32,
    pub day: String,
    pub exercise: String,
    pub set_number: i32,
    pub target: Option<String>,
    pub actual_weight: f64,
    pub actual_reps: i32,
    pub rir: i32,
}

impl From<ResistanceEntity> for ResistanceSet {
    fn from(entity: ResistanceEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            week: entity.week,
            day: entity.day,
            exercise: entity.exercise,
            set_number: entity.set_number,
            target: entity.target.unwrap_or_default(),
            actual_weight: entity.actual_weight,
            actual_reps: entity.actual_reps,
            rir: entity.rir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_becomes_empty() {
        let entity = ResistanceEntity {
            id: 1,
            user_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            week: 1,
            day: "Monday".to_string(),
            exercise: "Back-squat".to_string(),
            set_number: 1,
            target: None,
            actual_weight: 90.0,
            actual_reps: 8,
            rir: 2,
        };
        let set: ResistanceSet = entity.into();
        assert_eq!(set.target, "");
        assert_eq!(set.user_id, 2);
    }
}
