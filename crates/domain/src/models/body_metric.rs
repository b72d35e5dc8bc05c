//! Body metric domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Biological sex as recorded with body metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(format!("Invalid sex: {}", s)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated body measurement entry. Every measurement is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetric {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub body_fat_percentage: Option<f64>,
}

impl BodyMetric {
    /// Body mass index, when both height and weight were recorded.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height_cm, self.weight_kg) {
            (Some(height), Some(weight)) if height > 0.0 => {
                let meters = height / 100.0;
                Some(((weight / (meters * meters)) * 10.0).round() / 10.0)
            }
            _ => None,
        }
    }
}

/// Request payload for recording body metrics.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_has_measurement"))]
pub struct CreateBodyMetricRequest {
    pub date: NaiveDate,

    #[validate(range(min = 50.0, max = 250.0, message = "Height must be between 50 and 250 cm"))]
    pub height_cm: Option<f64>,

    #[validate(range(min = 20.0, max = 400.0, message = "Weight must be between 20 and 400 kg"))]
    pub weight_kg: Option<f64>,

    pub sex: Option<Sex>,

    #[validate(range(min = 10, max = 120, message = "Age must be between 10 and 120"))]
    pub age: Option<i32>,

    #[validate(range(min = 2.0, max = 70.0, message = "Body fat must be between 2 and 70 percent"))]
    pub body_fat_percentage: Option<f64>,
}

fn validate_has_measurement(req: &CreateBodyMetricRequest) -> Result<(), ValidationError> {
    let empty = req.height_cm.is_none()
        && req.weight_kg.is_none()
        && req.sex.is_none()
        && req.age.is_none()
        && req.body_fat_percentage.is_none();

    if empty {
        let mut err = ValidationError::new("no_measurement");
        err.message = Some("At least one measurement is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Response payload for a body metric entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetricResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub body_fat_percentage: Option<f64>,
    pub bmi: Option<f64>,
}

impl From<BodyMetric> for BodyMetricResponse {
    fn from(m: BodyMetric) -> Self {
        Self {
            bmi: m.bmi(),
            id: m.id,
            date: m.date,
            height_cm: m.height_cm,
            weight_kg: m.weight_kg,
            sex: m.sex,
            age: m.age,
            body_fat_percentage: m.body_fat_percentage,
        }
    }
}

/// Response for listing body metric entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBodyMetricsResponse {
    pub metrics: Vec<BodyMetricResponse>,
    pub total: usize,
}

impl From<Vec<BodyMetric>> for ListBodyMetricsResponse {
    fn from(metrics: Vec<BodyMetric>) -> Self {
        let metrics: Vec<BodyMetricResponse> = metrics.into_iter().map(Into::into).collect();
        Self {
            total: metrics.len(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(height_cm: Option<f64>, weight_kg: Option<f64>) -> BodyMetric {
        BodyMetric {
            id: 1,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            height_cm,
            weight_kg,
            sex: Some(Sex::Male),
            age: Some(34),
            body_fat_percentage: None,
        }
    }

    #[test]
    fn test_bmi() {
        assert_eq!(metric(Some(180.0), Some(81.0)).bmi(), Some(25.0));
        assert_eq!(metric(Some(175.0), Some(70.0)).bmi(), Some(22.9));
        assert_eq!(metric(None, Some(81.0)).bmi(), None);
        assert_eq!(metric(Some(180.0), None).bmi(), None);
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!(Sex::from_str("Female").unwrap(), Sex::Female);
        assert_eq!(Sex::from_str("male").unwrap(), Sex::Male);
        assert!(Sex::from_str("unknown").is_err());
        assert_eq!(serde_json::to_string(&Sex::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_request_requires_a_measurement() {
        let req: CreateBodyMetricRequest = serde_json::from_str(r#"{"date": "2024-05-01"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateBodyMetricRequest =
            serde_json::from_str(r#"{"date": "2024-05-01", "weightKg": 82.4}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_ranges() {
        let req: CreateBodyMetricRequest =
            serde_json::from_str(r#"{"date": "2024-05-01", "heightCm": 300.0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateBodyMetricRequest =
            serde_json::from_str(r#"{"date": "2024-05-01", "bodyFatPercentage": 1.0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateBodyMetricRequest =
            serde_json::from_str(r#"{"date": "2024-05-01", "age": 9}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_includes_bmi() {
        let json = serde_json::to_value(BodyMetricResponse::from(metric(Some(180.0), Some(81.0))))
            .unwrap();
        assert_eq!(json["bmi"], 25.0);
        assert_eq!(json["sex"], "male");
    }
}
