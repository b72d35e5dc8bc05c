//! Mobility session repository.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::entities::MobilityEntity;
use crate::metrics::QueryTimer;

const MOBILITY_COLUMNS: &str =
    "id, user_id, date, prep_done, joint_flow_done, animal_circuit_done, cuff_finisher_done";

/// Input for creating a mobility session.
#[derive(Debug, Clone)]
pub struct CreateMobilityInput {
    pub user_id: i64,
    pub date: NaiveDate,
    pub prep_done: bool,
    pub joint_flow_done: bool,
    pub animal_circuit_done: bool,
    pub cuff_finisher_done: bool,
}

/// Repository for mobility session operations.
#[derive(Clone)]
pub struct MobilityRepository {
    pool: SqlitePool,
}

impl MobilityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_session(
        &self,
        input: CreateMobilityInput,
    ) -> Result<MobilityEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_mobility_session");
        let result = sqlx::query_as::<_, MobilityEntity>(&format!(
            r#"
            INSERT INTO mobility
                (user_id, date, prep_done, joint_flow_done, animal_circuit_done, cuff_finisher_done)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {}
            "#,
            MOBILITY_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.prep_done)
        .bind(input.joint_flow_done)
        .bind(input.animal_circuit_done)
        .bind(input.cuff_finisher_done)
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
    ) -> Result<Vec<MobilityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mobility_sessions");
        let result = sqlx::query_as::<_, MobilityEntity>(&format!(
            r#"
            SELECT {}
            FROM mobility
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date DESC, id DESC
            "#,
            MOBILITY_COLUMNS
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
        let timer = QueryTimer::new("delete_mobility_session");
        let result = sqlx::query("DELETE FROM mobility WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
