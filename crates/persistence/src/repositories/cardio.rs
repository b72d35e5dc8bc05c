//! Cardio session repository.

use chrono::NaiveDate;
use domain::models::CardioType;
use sqlx::SqlitePool;

use crate::entities::CardioEntity;
use crate::metrics::QueryTimer;

const CARDIO_COLUMNS: &str = "id, user_id, date, type AS cardio_type, duration_min, avg_hr";

/// Input for creating a cardio session.
#[derive(Debug, Clone)]
pub struct CreateCardioInput {
    pub user_id: i64,
    pub date: NaiveDate,
    pub cardio_type: CardioType,
    pub duration_min: i32,
    pub avg_hr: i32,
}

/// Repository for cardio session operations.
#[derive(Clone)]
pub struct CardioRepository {
    pool: SqlitePool,
}

impl CardioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a session. The type is written as its display label.
    pub async fn create_session(
        &self,
        input: CreateCardioInput,
    ) -> Result<CardioEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_cardio_session");
        let result = sqlx::query_as::<_, CardioEntity>(&format!(
            r#"
            INSERT INTO cardio (user_id, date, type, duration_min, avg_hr)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {}
            "#,
            CARDIO_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.cardio_type.as_str())
        .bind(input.duration_min)
        .bind(input.avg_hr)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a user's sessions, newest first.
    pub async fn list_sessions(
        &self,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CardioEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_cardio_sessions");
        let result = sqlx::query_as::<_, CardioEntity>(&format!(
            r#"
            SELECT {}
            FROM cardio
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date DESC, id DESC
            "#,
            CARDIO_COLUMNS
        ))
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete_session(&self, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_cardio_session");
        let result = sqlx::query("DELETE FROM cardio WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
