//! Body metric entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::body_metric::{BodyMetric, Sex};

/// Database row mapping for the user_metrics table.
#[derive(Debug, Clone, FromRow)]
pub struct BodyMetricEntity {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub body_fat_percentage: Option<f64>,
}

impl From<BodyMetricEntity> for BodyMetric {
    fn from(entity: BodyMetricEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            height_cm: entity.height_cm,
            weight_kg: entity.weight_kg,
            sex: entity.sex.and_then(|s| s.parse::<Sex>().ok()),
            age: entity.age,
            body_fat_percentage: entity.body_fat_percentage,
        }
    }
}
