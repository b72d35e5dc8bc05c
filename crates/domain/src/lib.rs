//! Domain layer for the workout tracker.
//!
//! This crate contains:
//! - Domain models (users, resistance sets, mobility, cardio, body metrics)
//! - The training program the logging forms are bound to
//! - Chart aggregation over stored rows

pub mod models;
pub mod services;
