//! Assigns every workout log row to a single user.
//!
//! Used once after upgrading a single-user database: register the account
//! that should own the history, then run
//! `reassign-logs --username <name>`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use persistence::db::DatabaseConfig;
use persistence::repositories::{MaintenanceRepository, ReassignOutcome, UserRepository};
use workout_tracker_api::config::Config;

#[derive(Parser)]
#[command(name = "reassign-logs")]
#[command(about = "Assign all resistance, mobility and cardio logs to one user")]
struct Cli {
    /// Username that should own every log row
    #[arg(long)]
    username: String,

    /// Database URL (default: from configuration)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let db_config = match cli.database_url {
        Some(url) => DatabaseConfig {
            url,
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        },
        None => Config::load()
            .context("Failed to load configuration (or pass --database-url)")?
            .database
            .pool_config(),
    };

    let pool = persistence::db::create_pool(&db_config)
        .await
        .context("Failed to open database")?;
    persistence::db::initialize(&pool).await?;

    let username = cli.username.trim();
    let user = UserRepository::new(pool.clone())
        .find_by_username(username)
        .await?;
    let Some(user) = user else {
        bail!("User '{}' not found", username);
    };

    info!(user_id = user.id, username = %user.username, "Reassigning logs");

    let maintenance = MaintenanceRepository::new(pool.clone());
    for entry in maintenance.reassign_all_logs(user.id).await? {
        match entry.outcome {
            ReassignOutcome::MissingOwnerColumn => {
                info!(table = entry.table, "Skipped: table has no user_id column")
            }
            ReassignOutcome::Empty => info!(table = entry.table, "Skipped: table is empty"),
            ReassignOutcome::AlreadyAssigned { total } => {
                info!(table = entry.table, total, "Skipped: already assigned")
            }
            ReassignOutcome::Reassigned { total, updated } => {
                info!(table = entry.table, total, updated, "Reassigned rows")
            }
        }
    }

    for (table, count) in maintenance.log_counts().await? {
        info!(table, count, "Row count");
    }

    pool.close().await;
    Ok(())
}
