//! Persistence layer for the workout tracker.
//!
//! This crate contains:
//! - Database connection management and startup initialization
//! - Legacy schema upgrades for databases written by earlier versions
//! - Entity definitions (database row mappings)
//! - Repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod schema;

/// Tables holding per-user workout logs.
pub const LOG_TABLES: [&str; 3] = ["resistance", "mobility", "cardio"];
