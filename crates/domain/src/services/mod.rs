//! Domain services for the workout tracker.
//!
//! Services contain business logic that operates on domain models.

pub mod program;
pub mod progress;

pub use program::{find_exercise, program_overview, ProgramExercise, ProgramResponse};

pub use progress::{body_metric_trends, cardio_summary, resistance_progress, resistance_volume};
