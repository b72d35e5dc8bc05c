//! Query parameters shared by the list and chart endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Optional inclusive date window.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_order"))]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn validate_date_order(query: &DateRangeQuery) -> Result<(), ValidationError> {
    match (query.from, query.to) {
        (Some(from), Some(to)) if from > to => {
            let mut err = ValidationError::new("date_range");
            err.message = Some("'from' must not be after 'to'".into());
            Err(err)
        }
        _ => Ok(()),
    }
}
