//! Body metric repository.

use chrono::NaiveDate;
use domain::models::body_metric::Sex;
use sqlx::SqlitePool;

use crate::entities::BodyMetricEntity;
use crate::metrics::QueryTimer;

const BODY_METRIC_COLUMNS: &str =
    "id, user_id, date, height_cm, weight_kg, sex, age, body_fat_percentage";

/// Input for recording body metrics.
#[derive(Debug, Clone)]
pub struct CreateBodyMetricInput {
    pub user_id: i64,
    pub date: NaiveDate,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub body_fat_percentage: Option<f64>,
}

/// Repository for the user_metrics table.
#[derive(Clone)]
pub struct BodyMetricRepository {
    pool: SqlitePool,
}

impl BodyMetricRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_metric(
        &self,
        input: CreateBodyMetricInput,
    ) -> Result<BodyMetricEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_body_metric");
        let result = sqlx::query_as::<_, BodyMetricEntity>(&format!(
            r#"
            INSERT INTO user_metrics
                (user_id, date, height_cm, weight_kg, sex, age, body_fat_percentage)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {}
            "#,
            BODY_METRIC_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.height_cm)
        .bind(input.weight_kg)
        .bind(input.sex.map(|s| s.as_str()))
        .bind(input.age)
        .bind(input.body_fat_percentage)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a user's entries, newest first.
    pub async fn list_metrics(
        &self,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BodyMetricEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_body_metrics");
        let result = sqlx::query_as::<_, BodyMetricEntity>(&format!(
            r#"
            SELECT {}
            FROM user_metrics
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date DESC, id DESC
            "#,
            BODY_METRIC_COLUMNS
        ))
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete_metric(&self, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_body_metric");
        let result = sqlx::query("DELETE FROM user_metrics WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
