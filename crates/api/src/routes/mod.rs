//! HTTP route handlers.

pub mod auth;
pub mod body_metrics;
pub mod cardio;
pub mod charts;
pub mod health;
pub mod mobility;
pub mod program;
pub mod resistance;
pub mod users;
