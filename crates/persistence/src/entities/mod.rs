//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod body_metric;
pub mod cardio;
pub mod mobility;
pub mod resistance;
pub mod user;

pub use body_metric::BodyMetricEntity;
pub use cardio::CardioEntity;
pub use mobility::MobilityEntity;
pub use resistance::ResistanceEntity;
pub use user::{UserEntity, UserSessionEntity};
