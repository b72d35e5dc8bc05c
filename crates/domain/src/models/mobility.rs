//! Mobility session domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A mobility session with one completion flag per circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilitySession {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub prep_done: bool,
    pub joint_flow_done: bool,
    pub animal_circuit_done: bool,
    pub cuff_finisher_done: bool,
}

impl MobilitySession {
    pub fn completed_circuits(&self) -> usize {
        [
            self.prep_done,
            self.joint_flow_done,
            self.animal_circuit_done,
            self.cuff_finisher_done,
        ]
        .iter()
        .filter(|done| **done)
        .count()
    }
}

/// Request payload for logging a mobility session.
///
/// Unchecked circuits may be omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMobilityRequest {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub prep_done: bool,
    #[serde(default)]
    pub joint_flow_done: bool,
    #[serde(default)]
    pub animal_circuit_done: bool,
    #[serde(default)]
    pub cuff_finisher_done: bool,
}

/// Response payload for a mobility session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilitySessionResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub prep_done: bool,
    pub joint_flow_done: bool,
    pub animal_circuit_done: bool,
    pub cuff_finisher_done: bool,
    pub completed_circuits: usize,
}

impl From<MobilitySession> for MobilitySessionResponse {
    fn from(m: MobilitySession) -> Self {
        Self {
            completed_circuits: m.completed_circuits(),
            id: m.id,
            date: m.date,
            prep_done: m.prep_done,
            joint_flow_done: m.joint_flow_done,
            animal_circuit_done: m.animal_circuit_done,
            cuff_finisher_done: m.cuff_finisher_done,
        }
    }
}

/// Response for listing mobility sessions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMobilityResponse {
    pub sessions: Vec<MobilitySessionResponse>,
    pub total: usize,
}

impl From<Vec<MobilitySession>> for ListMobilityResponse {
    fn from(sessions: Vec<MobilitySession>) -> Self {
        let sessions: Vec<MobilitySessionResponse> =
            sessions.into_iter().map(Into::into).collect();
        Self {
            total: sessions.len(),
            sessions,
        }
    }
}
