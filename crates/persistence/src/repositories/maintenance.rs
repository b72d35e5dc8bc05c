//! Maintenance operations over the log tables.

use sqlx::SqlitePool;

use crate::metrics::QueryTimer;
use crate::schema;
use crate::LOG_TABLES;

/// What happened to one table during a reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassignOutcome {
    /// The table has no `user_id` column (not yet upgraded).
    MissingOwnerColumn,
    /// The table has no rows.
    Empty,
    /// Every row already belongs to the target user.
    AlreadyAssigned { total: i64 },
    /// Rows were moved to the target user.
    Reassigned { total: i64, updated: i64 },
}

/// Per-table result of [`MaintenanceRepository::reassign_all_logs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReassignment {
    pub table: &'static str,
    pub outcome: ReassignOutcome,
}

/// Repository for whole-table maintenance.
#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: SqlitePool,
}

impl MaintenanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count rows in a log table, optionally only those owned by `user_id`.
    async fn count_rows(&self, table: &str, user_id: Option<i64>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_log_rows");
        let result = match user_id {
            Some(id) => {
                sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", table))
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                    .fetch_one(&self.pool)
                    .await
            }
        };
        timer.record();
        result
    }

    /// Row counts for every log table.
    pub async fn log_counts(&self) -> Result<Vec<(&'static str, i64)>, sqlx::Error> {
        let mut counts = Vec::with_capacity(LOG_TABLES.len());
        for table in LOG_TABLES {
            let count = if schema::table_exists(&self.pool, table).await? {
                self.count_rows(table, None).await?
            } else {
                0
            };
            counts.push((table, count));
        }
        Ok(counts)
    }

    /// Assign every row of every log table to one user, whatever its
    /// current owner. Each table is updated in its own transaction.
    pub async fn reassign_all_logs(
        &self,
        user_id: i64,
    ) -> Result<Vec<TableReassignment>, sqlx::Error> {
        let mut report = Vec::with_capacity(LOG_TABLES.len());

        for table in LOG_TABLES {
            let outcome = self.reassign_table(table, user_id).await?;
            report.push(TableReassignment { table, outcome });
        }

        Ok(report)
    }

    async fn reassign_table(
        &self,
        table: &'static str,
        user_id: i64,
    ) -> Result<ReassignOutcome, sqlx::Error> {
        if !schema::table_exists(&self.pool, table).await?
            || !schema::column_names(&self.pool, table)
                .await?
                .iter()
                .any(|c| c == "user_id")
        {
            return Ok(ReassignOutcome::MissingOwnerColumn);
        }

        let total = self.count_rows(table, None).await?;
        if total == 0 {
            return Ok(ReassignOutcome::Empty);
        }

        let owned = self.count_rows(table, Some(user_id)).await?;
        if owned == total {
            return Ok(ReassignOutcome::AlreadyAssigned { total });
        }

        let timer = QueryTimer::new("reassign_log_rows");
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("UPDATE {} SET user_id = ?1", table))
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        timer.record();

        Ok(ReassignOutcome::Reassigned {
            total,
            updated: total - owned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");
        crate::db::initialize(&pool).await.unwrap();
        pool
    }

    async fn add_user(pool: &SqlitePool, username: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO users (username, password_hash) VALUES (?1, 'x') RETURNING id")
            .bind(username)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn add_cardio(pool: &SqlitePool, user_id: i64) {
        sqlx::query(
            "INSERT INTO cardio (user_id, date, type, duration_min, avg_hr) VALUES (?1, '2024-05-01', 'Other', 20, 120)",
        )
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_reassign_all_logs() {
        let pool = memory_pool().await;
        let first = add_user(&pool, "first").await;
        let target = add_user(&pool, "target").await;
        add_cardio(&pool, first).await;
        add_cardio(&pool, target).await;

        let repo = MaintenanceRepository::new(pool.clone());
        let report = repo.reassign_all_logs(target).await.unwrap();

        assert_eq!(
            report,
            vec![
                TableReassignment { table: "resistance", outcome: ReassignOutcome::Empty },
                TableReassignment { table: "mobility", outcome: ReassignOutcome::Empty },
                TableReassignment {
                    table: "cardio",
                    outcome: ReassignOutcome::Reassigned { total: 2, updated: 1 },
                },
            ]
        );

        // Running again changes nothing
        let report = repo.reassign_all_logs(target).await.unwrap();
        assert_eq!(report[2].outcome, ReassignOutcome::AlreadyAssigned { total: 2 });
    }

    #[tokio::test]
    async fn test_log_counts() {
        let pool = memory_pool().await;
        let user = add_user(&pool, "counter").await;
        add_cardio(&pool, user).await;
        add_cardio(&pool, user).await;

        let counts = MaintenanceRepository::new(pool).log_counts().await.unwrap();
        assert_eq!(counts, vec![("resistance", 0), ("mobility", 0), ("cardio", 2)]);
    }
}
