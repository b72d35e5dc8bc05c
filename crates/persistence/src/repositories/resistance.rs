//! Resistance set repository.

use chrono::NaiveDate;
use domain::models::resistance::NewResistanceSet;
use sqlx::SqlitePool;

use crate::entities::ResistanceEntity;
use crate::metrics::QueryTimer;

const RESISTANCE_COLUMNS: &str = "id, user_id, date, week, day, exercise, set_number, target, \
                                  actual_weight, actual_reps, rir";

/// Repository for resistance set operations.
#[derive(Clone)]
pub struct ResistanceRepository {
    pool: SqlitePool,
}

impl ResistanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert all sets of a session atomically.
    ///
    /// Either every set is stored or none is.
    pub async fn insert_sets(
        &self,
        user_id: i64,
        sets: &[NewResistanceSet],
    ) -> Result<Vec<ResistanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("insert_resistance_sets");
        let insert = format!(
            r#"
            INSERT INTO resistance
                (user_id, date, week, day, exercise, set_number, target,
                 actual_weight, actual_reps, rir)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING {}
            "#,
            RESISTANCE_COLUMNS
        );

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(sets.len());
        for set in sets {
            let row = sqlx::query_as::<_, ResistanceEntity>(&insert)
                .bind(user_id)
                .bind(set.date)
                .bind(set.week)
                .bind(&set.day)
                .bind(&set.exercise)
                .bind(set.set_number)
                .bind(&set.target)
                .bind(set.actual_weight)
                .bind(set.actual_reps)
                .bind(set.rir)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }
        tx.commit().await?;
        timer.record();

        Ok(inserted)
    }

    /// List a user's sets, newest first, optionally within an inclusive date window.
    pub async fn list_sets(
        &self,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ResistanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_resistance_sets");
        let result = sqlx::query_as::<_, ResistanceEntity>(&format!(
            r#"
            SELECT {}
            FROM resistance
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date DESC, id DESC
            "#,
            RESISTANCE_COLUMNS
        ))
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The most recent set logged for an exercise and set number.
    ///
    /// Ties on date go to the set inserted last.
    pub async fn find_last_set(
        &self,
        user_id: i64,
        exercise: &str,
        set_number: i32,
    ) -> Result<Option<ResistanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_last_resistance_set");
        let result = sqlx::query_as::<_, ResistanceEntity>(&format!(
            r#"
            SELECT {}
            FROM resistance
            WHERE user_id = ?1 AND exercise = ?2 AND set_number = ?3
            ORDER BY date DESC, id DESC
            LIMIT 1
            "#,
            RESISTANCE_COLUMNS
        ))
        .bind(user_id)
        .bind(exercise)
        .bind(set_number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete one of the user's sets. Returns false if no such set is owned by the user.
    pub async fn delete_set(&self, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_resistance_set");
        let result = sqlx::query("DELETE FROM resistance WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
