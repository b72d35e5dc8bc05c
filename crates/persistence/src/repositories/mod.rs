//! Repository implementations for database operations.

pub mod body_metric;
pub mod cardio;
pub mod maintenance;
pub mod mobility;
pub mod resistance;
pub mod session;
pub mod user;

pub use body_metric::{BodyMetricRepository, CreateBodyMetricInput};
pub use cardio::{CardioRepository, CreateCardioInput};
pub use maintenance::{MaintenanceRepository, ReassignOutcome, TableReassignment};
pub use mobility::{CreateMobilityInput, MobilityRepository};
pub use resistance::ResistanceRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
