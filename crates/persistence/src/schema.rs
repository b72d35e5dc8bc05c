//! In-place upgrades for databases written by earlier versions of the tracker.
//!
//! The first version stored logs without a `user_id` and, initially, without
//! `resistance.set_number`. Those tables are upgraded before migrations run;
//! rows left without an owner are handed to the first registered user.

use sqlx::{Row, SqlitePool};

use crate::metrics::QueryTimer;
use crate::LOG_TABLES;

/// Columns added to pre-existing tables, as `(table, column, definition)`.
const LEGACY_COLUMNS: &[(&str, &str, &str)] = &[
    ("resistance", "set_number", "INTEGER DEFAULT 1"),
    ("resistance", "user_id", "INTEGER"),
    ("mobility", "user_id", "INTEGER"),
    ("cardio", "user_id", "INTEGER"),
];

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid_identifier(name: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("invalid SQL identifier: {}", name))
}

/// Returns true if a table with the given name exists.
pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .bind(table)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Lists the column names of a table, in declaration order.
pub async fn column_names(pool: &SqlitePool, table: &str) -> Result<Vec<String>, sqlx::Error> {
    if !is_identifier(table) {
        return Err(invalid_identifier(table));
    }

    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;

    rows.iter().map(|row| row.try_get::<String, _>("name")).collect()
}

/// Adds a column unless it already exists.
///
/// Returns true if the column was added. Calling it again is a no-op.
pub async fn ensure_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<bool, sqlx::Error> {
    if !is_identifier(column) {
        return Err(invalid_identifier(column));
    }

    let columns = column_names(pool, table).await?;
    if columns.iter().any(|c| c == column) {
        return Ok(false);
    }

    let timer = QueryTimer::new("ensure_column");
    let result = sqlx::query(&format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table, column, definition
    ))
    .execute(pool)
    .await;
    timer.record();

    match result {
        Ok(_) => {
            tracing::info!(table, column, "Added missing column");
            Ok(true)
        }
        // Another process may have added it between the check and the ALTER
        Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column name") => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Adds the columns later versions rely on to tables that already exist.
///
/// Tables that do not exist yet are left to the migrations.
pub async fn prepare_legacy_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (table, column, definition) in LEGACY_COLUMNS {
        if table_exists(pool, table).await? {
            ensure_column(pool, table, column, definition).await?;
        }
    }
    Ok(())
}

/// Returns the id of the earliest registered user.
pub async fn first_user_id(pool: &SqlitePool) -> Result<Option<i64>, sqlx::Error> {
    let timer = QueryTimer::new("find_first_user_id");
    let result = sqlx::query_scalar("SELECT id FROM users ORDER BY id LIMIT 1")
        .fetch_optional(pool)
        .await;
    timer.record();
    result
}

/// Assigns log rows without an owner to the first registered user.
///
/// Returns the number of rows updated across all log tables; zero when no
/// user exists yet.
pub async fn assign_orphaned_logs(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let Some(user_id) = first_user_id(pool).await? else {
        return Ok(0);
    };

    let mut total = 0;
    for table in LOG_TABLES {
        let timer = QueryTimer::new("assign_orphaned_logs");
        let result = sqlx::query(&format!(
            "UPDATE {} SET user_id = ?1 WHERE user_id IS NULL",
            table
        ))
        .bind(user_id)
        .execute(pool)
        .await;
        timer.record();

        let updated = result?.rows_affected();
        if updated > 0 {
            tracing::debug!(table, user_id, rows = updated, "Assigned orphaned rows");
        }
        total += updated;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool")
    }

    /// Tables as the first single-user version created them.
    async fn create_legacy_tables(pool: &SqlitePool) {
        sqlx::query(
            r#"
            CREATE TABLE resistance(
                id INTEGER PRIMARY KEY, date TEXT, week INTEGER, day TEXT, exercise TEXT,
                target TEXT, actual_weight REAL, actual_reps INTEGER, rir INTEGER
            );
            CREATE TABLE mobility(
                id INTEGER PRIMARY KEY, date TEXT, prep_done INTEGER, joint_flow_done INTEGER,
                animal_circuit_done INTEGER, cuff_finisher_done INTEGER
            );
            CREATE TABLE cardio(
                id INTEGER PRIMARY KEY, date TEXT, type TEXT, duration_min INTEGER, avg_hr INTEGER
            );
            INSERT INTO resistance(date, week, day, exercise, target, actual_weight, actual_reps, rir)
                VALUES ('2024-04-01', 1, 'Monday', 'Back-squat', '4×8', 90.0, 8, 2);
            INSERT INTO cardio(date, type, duration_min, avg_hr)
                VALUES ('2024-04-02', 'Zone-2 Run', 45, 138);
            "#,
        )
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_column_is_idempotent() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(ensure_column(&pool, "t", "extra", "INTEGER DEFAULT 1")
            .await
            .unwrap());
        assert!(!ensure_column(&pool, "t", "extra", "INTEGER DEFAULT 1")
            .await
            .unwrap());

        let columns = column_names(&pool, "t").await.unwrap();
        assert_eq!(columns, vec!["id".to_string(), "extra".to_string()]);
    }

    #[tokio::test]
    async fn test_ensure_column_rejects_bad_identifiers() {
        let pool = memory_pool().await;
        assert!(ensure_column(&pool, "t; DROP TABLE users", "x", "INTEGER")
            .await
            .is_err());
        assert!(ensure_column(&pool, "t", "x y", "INTEGER").await.is_err());
    }

    #[tokio::test]
    async fn test_prepare_legacy_tables_adds_missing_columns() {
        let pool = memory_pool().await;
        create_legacy_tables(&pool).await;

        prepare_legacy_tables(&pool).await.unwrap();

        let columns = column_names(&pool, "resistance").await.unwrap();
        assert!(columns.contains(&"set_number".to_string()));
        assert!(columns.contains(&"user_id".to_string()));
        assert!(column_names(&pool, "cardio")
            .await
            .unwrap()
            .contains(&"user_id".to_string()));

        let set_number: i64 = sqlx::query_scalar("SELECT set_number FROM resistance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(set_number, 1);
    }

    #[tokio::test]
    async fn test_prepare_legacy_tables_skips_missing_tables() {
        let pool = memory_pool().await;
        prepare_legacy_tables(&pool).await.unwrap();
        assert!(!table_exists(&pool, "resistance").await.unwrap());
    }

    #[tokio::test]
    async fn test_orphans_go_to_first_user() {
        let pool = memory_pool().await;
        create_legacy_tables(&pool).await;
        prepare_legacy_tables(&pool).await.unwrap();

        sqlx::query(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT UNIQUE NOT NULL, password_hash TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();

        // No users yet: nothing to assign
        assert_eq!(assign_orphaned_logs(&pool).await.unwrap(), 0);

        sqlx::query("INSERT INTO users (username, password_hash) VALUES ('first', 'x'), ('second', 'y')")
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(assign_orphaned_logs(&pool).await.unwrap(), 2);
        let owner: i64 = sqlx::query_scalar("SELECT user_id FROM cardio")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(owner, first_user_id(&pool).await.unwrap().unwrap());

        // Second run finds nothing left to assign
        assert_eq!(assign_orphaned_logs(&pool).await.unwrap(), 0);
    }
}
