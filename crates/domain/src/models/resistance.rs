//! Resistance training domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single logged working set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistanceSet {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub week: i32,
    pub day: String,
    pub exercise: String,
    pub set_number: i32,
    pub target: String,
    pub actual_weight: f64,
    pub actual_reps: i32,
    pub rir: i32,
}

impl ResistanceSet {
    /// Weight moved across all reps of the set.
    pub fn volume(&self) -> f64 {
        self.actual_weight * f64::from(self.actual_reps)
    }
}

/// A set ready to be written; ids are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResistanceSet {
    pub date: NaiveDate,
    pub week: i32,
    pub day: String,
    pub exercise: String,
    pub set_number: i32,
    pub target: String,
    pub actual_weight: f64,
    pub actual_reps: i32,
    pub rir: i32,
}

/// Performance recorded for one set in a save request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetInput {
    #[validate(
        range(min = 0.0, max = 150.0, message = "Weight must be between 0 and 150 kg"),
        custom(function = "shared::validation::validate_weight_increment")
    )]
    pub weight_kg: f64,

    #[validate(range(min = 1, max = 20, message = "Reps must be between 1 and 20"))]
    pub reps: i32,

    #[validate(range(min = 0, max = 5, message = "RIR must be between 0 and 5"))]
    pub rir: i32,
}

/// Request payload for saving one exercise's sets for a session.
///
/// Sets are numbered in the order given, starting at 1. The `target` stored
/// with each set comes from the program, not from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResistanceRequest {
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 4, message = "Week must be between 1 and 4"))]
    pub week: i32,

    #[validate(length(min = 1, max = 50, message = "Day must be 1-50 characters"))]
    pub day: String,

    #[validate(length(min = 1, max = 100, message = "Exercise must be 1-100 characters"))]
    pub exercise: String,

    #[validate(length(max = 10, message = "At most 10 sets can be saved at once"), nested)]
    #[serde(default)]
    pub sets: Vec<SetInput>,
}

impl CreateResistanceRequest {
    /// Expands the request into rows for the given date and target.
    pub fn into_new_sets(self, date: NaiveDate, target: &str) -> Vec<NewResistanceSet> {
        let CreateResistanceRequest {
            week,
            day,
            exercise,
            sets,
            ..
        } = self;

        sets.into_iter()
            .zip(1..)
            .map(|(set, set_number)| NewResistanceSet {
                date,
                week,
                day: day.clone(),
                exercise: exercise.clone(),
                set_number,
                target: target.to_string(),
                actual_weight: set.weight_kg,
                actual_reps: set.reps,
                rir: set.rir,
            })
            .collect()
    }
}

/// Query parameters for the "repeat last session" lookup.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LastSetQuery {
    #[validate(length(min = 1, max = 100, message = "Exercise must be 1-100 characters"))]
    pub exercise: String,

    #[validate(range(min = 1, max = 10, message = "Set number must be between 1 and 10"))]
    pub set_number: i32,
}

/// Most recent performance for an exercise and set number.
///
/// All fields are null when nothing has been logged yet.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastSetResponse {
    pub weight_kg: Option<f64>,
    pub reps: Option<i32>,
    pub rir: Option<i32>,
}

impl From<Option<ResistanceSet>> for LastSetResponse {
    fn from(set: Option<ResistanceSet>) -> Self {
        match set {
            Some(s) => Self {
                weight_kg: Some(s.actual_weight),
                reps: Some(s.actual_reps),
                rir: Some(s.rir),
            },
            None => Self::default(),
        }
    }
}

/// Response payload for a logged set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistanceSetResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub week: i32,
    pub day: String,
    pub exercise: String,
    pub set_number: i32,
    pub target: String,
    pub weight_kg: f64,
    pub reps: i32,
    pub rir: i32,
}

impl From<ResistanceSet> for ResistanceSetResponse {
    fn from(s: ResistanceSet) -> Self {
        Self {
            id: s.id,
            date: s.date,
            week: s.week,
            day: s.day,
            exercise: s.exercise,
            set_number: s.set_number,
            target: s.target,
            weight_kg: s.actual_weight,
            reps: s.actual_reps,
            rir: s.rir,
        }
    }
}

/// Response for listing or saving sets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResistanceResponse {
    pub sets: Vec<ResistanceSetResponse>,
    pub total: usize,
}

impl From<Vec<ResistanceSet>> for ListResistanceResponse {
    fn from(sets: Vec<ResistanceSet>) -> Self {
        let sets: Vec<ResistanceSetResponse> = sets.into_iter().map(Into::into).collect();
        Self {
            total: sets.len(),
            sets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(weight_kg: f64, reps: i32, rir: i32) -> SetInput {
        SetInput {
            weight_kg,
            reps,
            rir,
        }
    }

    fn request(sets: Vec<SetInput>) -> CreateResistanceRequest {
        CreateResistanceRequest {
            date: None,
            week: 1,
            day: "Monday".to_string(),
            exercise: "Back-squat".to_string(),
            sets,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request(vec![set(100.0, 4, 2), set(82.5, 6, 3)]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_week_out_of_range() {
        let mut req = request(vec![set(100.0, 4, 2)]);
        req.week = 5;
        assert!(req.validate().is_err());
        req.week = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_too_many_sets() {
        let req = request((0..11).map(|_| set(60.0, 8, 2)).collect());
        let errors = req.validate().unwrap_err();
        let field = errors.field_errors();
        let set_errors = field.get("sets").unwrap();
        assert_eq!(set_errors[0].code, "length");
        assert_eq!(
            set_errors[0].message.as_deref(),
            Some("At most 10 sets can be saved at once")
        );
    }

    #[test]
    fn test_set_limits() {
        assert!(set(150.0, 20, 5).validate().is_ok());
        assert!(set(0.0, 1, 0).validate().is_ok());
        assert!(set(150.5, 8, 2).validate().is_err());
        assert!(set(-0.5, 8, 2).validate().is_err());
        assert!(set(60.0, 0, 2).validate().is_err());
        assert!(set(60.0, 21, 2).validate().is_err());
        assert!(set(60.0, 8, 6).validate().is_err());
    }

    #[test]
    fn test_weight_must_use_half_kilo_steps() {
        let errors = set(60.25, 8, 2).validate().unwrap_err();
        let field = errors.field_errors();
        let weight_errors = field.get("weight_kg").unwrap();
        assert_eq!(weight_errors[0].code, "weight_increment");
    }

    #[test]
    fn test_invalid_nested_set_fails_request() {
        let req = request(vec![set(100.0, 4, 2), set(100.0, 30, 2)]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_new_sets_numbers_sets_in_order() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let rows = request(vec![set(100.0, 4, 2), set(82.5, 6, 3), set(82.5, 6, 2)])
            .into_new_sets(date, "1×4 @88% + 3×6 @78%");

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.set_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(rows.iter().all(|r| r.date == date));
        assert!(rows.iter().all(|r| r.target == "1×4 @88% + 3×6 @78%"));
        assert_eq!(rows[1].actual_weight, 82.5);
        assert_eq!(rows[1].actual_reps, 6);
        assert_eq!(rows[1].rir, 3);
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "date": "2024-05-06",
            "week": 2,
            "day": "Tuesday",
            "exercise": "Dips",
            "sets": [{"weightKg": 10.0, "reps": 10, "rir": 2}]
        }"#;
        let req: CreateResistanceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(req.sets.len(), 1);
        assert_eq!(req.sets[0].weight_kg, 10.0);
    }

    #[test]
    fn test_missing_sets_defaults_to_empty() {
        let json = r#"{"week": 1, "day": "Monday", "exercise": "Hip-thrust"}"#;
        let req: CreateResistanceRequest = serde_json::from_str(json).unwrap();
        assert!(req.sets.is_empty());
    }

    #[test]
    fn test_last_set_response_from_none_is_all_null() {
        let json = serde_json::to_value(LastSetResponse::from(None)).unwrap();
        assert!(json["weightKg"].is_null());
        assert!(json["reps"].is_null());
        assert!(json["rir"].is_null());
    }

    #[test]
    fn test_volume() {
        let s = ResistanceSet {
            id: 1,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            week: 1,
            day: "Monday".to_string(),
            exercise: "Back-squat".to_string(),
            set_number: 1,
            target: "4×8".to_string(),
            actual_weight: 80.0,
            actual_reps: 8,
            rir: 2,
        };
        assert_eq!(s.volume(), 640.0);
    }
}
