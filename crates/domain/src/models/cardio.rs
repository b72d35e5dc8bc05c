//! Cardio session domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Kind of cardio work.
///
/// The API uses the snake_case codes; the database keeps the display labels
/// so rows written by earlier versions of the app stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardioType {
    #[serde(rename = "hiit_4x4")]
    Hiit4x4,
    #[serde(rename = "hiit_10_min")]
    Hiit10Min,
    #[serde(rename = "zone2_run")]
    Zone2Run,
    Other,
}

impl CardioType {
    pub const ALL: [CardioType; 4] = [
        CardioType::Hiit4x4,
        CardioType::Hiit10Min,
        CardioType::Zone2Run,
        CardioType::Other,
    ];

    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardioType::Hiit4x4 => "HIIT (4×4)",
            CardioType::Hiit10Min => "10-min HIIT",
            CardioType::Zone2Run => "Zone-2 Run",
            CardioType::Other => "Other",
        }
    }

    /// API code, as used in request and response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CardioType::Hiit4x4 => "hiit_4x4",
            CardioType::Hiit10Min => "hiit_10_min",
            CardioType::Zone2Run => "zone2_run",
            CardioType::Other => "other",
        }
    }
}

impl FromStr for CardioType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardioType::ALL
            .into_iter()
            .find(|t| t.as_str() == s || t.code() == s)
            .ok_or_else(|| format!("Invalid cardio type: {}", s))
    }
}

impl fmt::Display for CardioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logged cardio session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioSession {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub cardio_type: CardioType,
    pub duration_min: i32,
    pub avg_hr: i32,
}

/// Request payload for logging a cardio session.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardioRequest {
    pub date: Option<NaiveDate>,

    #[serde(rename = "type")]
    pub cardio_type: CardioType,

    #[validate(range(min = 1, max = 180, message = "Duration must be between 1 and 180 minutes"))]
    pub duration_min: i32,

    #[validate(range(min = 30, max = 220, message = "Average heart rate must be between 30 and 220 bpm"))]
    pub avg_hr: i32,
}

/// Response payload for a cardio session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioSessionResponse {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub cardio_type: CardioType,
    pub label: &'static str,
    pub duration_min: i32,
    pub avg_hr: i32,
}

impl From<CardioSession> for CardioSessionResponse {
    fn from(c: CardioSession) -> Self {
        Self {
            id: c.id,
            date: c.date,
            cardio_type: c.cardio_type,
            label: c.cardio_type.as_str(),
            duration_min: c.duration_min,
            avg_hr: c.avg_hr,
        }
    }
}

/// Response for listing cardio sessions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCardioResponse {
    pub sessions: Vec<CardioSessionResponse>,
    pub total: usize,
}

impl From<Vec<CardioSession>> for ListCardioResponse {
    fn from(sessions: Vec<CardioSession>) -> Self {
        let sessions: Vec<CardioSessionResponse> = sessions.into_iter().map(Into::into).collect();
        Self {
            total: sessions.len(),
            sessions,
        }
    }
}
