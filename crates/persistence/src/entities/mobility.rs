//! Mobility session entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::MobilitySession;

/// Database row mapping for the mobility table. Flags are stored as 0/1.
#[derive(Debug, Clone, FromRow)]
pub struct MobilityEntity {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub prep_done: bool,
    pub joint_flow_done: bool,
    pub animal_circuit_done: bool,
    pub cuff_finisher_done: bool,
}

impl From<MobilityEntity> for MobilitySession {
    fn from(entity: MobilityEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            prep_done: entity.prep_done,
            joint_flow_done: entity.joint_flow_done,
            animal_circuit_done: entity.animal_circuit_done,
            cuff_finisher_done: entity.cuff_finisher_done,
        }
    }
}
