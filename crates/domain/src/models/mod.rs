//! Domain models for the workout tracker.

pub mod body_metric;
pub mod cardio;
pub mod chart;
pub mod mobility;
pub mod query;
pub mod resistance;
pub mod user;

pub use body_metric::BodyMetric;
pub use cardio::{CardioSession, CardioType};
pub use chart::{ChartPoint, ChartResponse, ChartSeries};
pub use mobility::MobilitySession;
pub use query::DateRangeQuery;
pub use resistance::ResistanceSet;
pub use user::{User, UserSession};
