//! Chart aggregation over stored log rows.
//!
//! Every series is a plain aggregation of the rows passed in: no smoothing,
//! no interpolation, dates ascending.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{BodyMetric, CardioSession, ChartPoint, ChartSeries, ResistanceSet};

pub const VOLUME_SERIES: &str = "volume";
pub const CARDIO_MINUTES_SERIES: &str = "minutes";
pub const CARDIO_AVG_HR_SERIES: &str = "avgHr";
pub const BODY_WEIGHT_SERIES: &str = "weightKg";
pub const BODY_FAT_SERIES: &str = "bodyFatPercentage";

fn to_points(by_date: BTreeMap<NaiveDate, f64>) -> Vec<ChartPoint> {
    by_date
        .into_iter()
        .map(|(date, value)| ChartPoint { date, value })
        .collect()
}

/// Heaviest weight per date for each exercise, one series per exercise in
/// name order.
pub fn resistance_progress(sets: &[ResistanceSet]) -> Vec<ChartSeries> {
    let mut by_exercise: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for set in sets {
        by_exercise
            .entry(set.exercise.as_str())
            .or_default()
            .entry(set.date)
            .and_modify(|max| *max = max.max(set.actual_weight))
            .or_insert(set.actual_weight);
    }

    by_exercise
        .into_iter()
        .map(|(exercise, by_date)| ChartSeries::new(exercise, to_points(by_date)))
        .collect()
}

/// Total tonnage (weight × reps) per date across all exercises.
pub fn resistance_volume(sets: &[ResistanceSet]) -> ChartSeries {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for set in sets {
        *by_date.entry(set.date).or_default() += set.volume();
    }
    ChartSeries::new(VOLUME_SERIES, to_points(by_date))
}

/// Total minutes per date and the duration-weighted average heart rate.
pub fn cardio_summary(sessions: &[CardioSession]) -> Vec<ChartSeries> {
    // (minutes, minutes × bpm)
    let mut by_date: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for s in sessions {
        let entry = by_date.entry(s.date).or_default();
        entry.0 += i64::from(s.duration_min);
        entry.1 += i64::from(s.duration_min) * i64::from(s.avg_hr);
    }

    let minutes = by_date
        .iter()
        .map(|(date, (total, _))| ChartPoint {
            date: *date,
            value: *total as f64,
        })
        .collect();

    let avg_hr = by_date
        .iter()
        .filter(|(_, (total, _))| *total > 0)
        .map(|(date, (total, weighted))| ChartPoint {
            date: *date,
            value: *weighted as f64 / *total as f64,
        })
        .collect();

    vec![
        ChartSeries::new(CARDIO_MINUTES_SERIES, minutes),
        ChartSeries::new(CARDIO_AVG_HR_SERIES, avg_hr),
    ]
}

/// Body weight and body-fat series. When several entries share a date the
/// one recorded last (highest id) wins.
pub fn body_metric_trends(metrics: &[BodyMetric]) -> Vec<ChartSeries> {
    let mut ordered: Vec<&BodyMetric> = metrics.iter().collect();
    ordered.sort_by_key(|m| m.id);

    let mut weight: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut body_fat: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for m in ordered {
        if let Some(w) = m.weight_kg {
            weight.insert(m.date, w);
        }
        if let Some(bf) = m.body_fat_percentage {
            body_fat.insert(m.date, bf);
        }
    }

    vec![
        ChartSeries::new(BODY_WEIGHT_SERIES, to_points(weight)),
        ChartSeries::new(BODY_FAT_SERIES, to_points(body_fat)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardioType;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn set(id: i64, date: NaiveDate, exercise: &str, weight: f64, reps: i32) -> ResistanceSet {
        ResistanceSet {
            id,
            user_id: 1,
            date,
            week: 1,
            day: "Monday".to_string(),
            exercise: exercise.to_string(),
            set_number: 1,
            target: "4×8".to_string(),
            actual_weight: weight,
            actual_reps: reps,
            rir: 2,
        }
    }

    fn cardio(date: NaiveDate, duration_min: i32, avg_hr: i32) -> CardioSession {
        CardioSession {
            id: 0,
            user_id: 1,
            date,
            cardio_type: CardioType::Other,
            duration_min,
            avg_hr,
        }
    }

    #[test]
    fn test_resistance_progress_takes_max_per_date() {
        let sets = vec![
            set(1, d(6), "Back-squat", 100.0, 4),
            set(2, d(6), "Back-squat", 85.0, 6),
            set(3, d(13), "Back-squat", 102.5, 4),
            set(4, d(6), "Hip-thrust", 120.0, 8),
        ];

        let series = resistance_progress(&sets);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Back-squat");
        assert_eq!(
            series[0].points,
            vec![
                ChartPoint { date: d(6), value: 100.0 },
                ChartPoint { date: d(13), value: 102.5 },
            ]
        );
        assert_eq!(series[1].name, "Hip-thrust");
        assert_eq!(series[1].points.len(), 1);
    }

    #[test]
    fn test_resistance_progress_sorts_dates_regardless_of_input_order() {
        let sets = vec![
            set(1, d(20), "Deadlift", 140.0, 3),
            set(2, d(2), "Deadlift", 130.0, 3),
            set(3, d(9), "Deadlift", 135.0, 3),
        ];
        let series = resistance_progress(&sets);
        let dates: Vec<NaiveDate> = series[0].points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2), d(9), d(20)]);
    }

    #[test]
    fn test_resistance_progress_empty() {
        assert!(resistance_progress(&[]).is_empty());
        assert!(resistance_volume(&[]).points.is_empty());
    }

    #[test]
    fn test_resistance_volume_sums_across_exercises() {
        let sets = vec![
            set(1, d(6), "Back-squat", 100.0, 4),
            set(2, d(6), "Hip-thrust", 60.0, 8),
            set(3, d(7), "Dips", 0.0, 10),
        ];
        let series = resistance_volume(&sets);
        assert_eq!(series.name, VOLUME_SERIES);
        assert_eq!(
            series.points,
            vec![
                ChartPoint { date: d(6), value: 880.0 },
                ChartPoint { date: d(7), value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_cardio_summary_weights_heart_rate_by_duration() {
        let sessions = vec![cardio(d(9), 30, 120), cardio(d(9), 10, 160), cardio(d(11), 60, 135)];
        let series = cardio_summary(&sessions);

        assert_eq!(series[0].name, CARDIO_MINUTES_SERIES);
        assert_eq!(
            series[0].points,
            vec![
                ChartPoint { date: d(9), value: 40.0 },
                ChartPoint { date: d(11), value: 60.0 },
            ]
        );
        assert_eq!(series[1].name, CARDIO_AVG_HR_SERIES);
        assert_eq!(series[1].points[0].value, 130.0);
        assert_eq!(series[1].points[1].value, 135.0);
    }

    #[test]
    fn test_body_metric_trends_last_entry_per_date_wins() {
        let metric = |id, date, weight: Option<f64>, fat: Option<f64>| BodyMetric {
            id,
            user_id: 1,
            date,
            height_cm: None,
            weight_kg: weight,
            sex: None,
            age: None,
            body_fat_percentage: fat,
        };
        let metrics = vec![
            metric(2, d(1), Some(81.5), None),
            metric(1, d(1), Some(82.0), Some(18.0)),
            metric(3, d(8), Some(81.0), Some(17.5)),
        ];

        let series = body_metric_trends(&metrics);
        assert_eq!(series[0].name, BODY_WEIGHT_SERIES);
        assert_eq!(
            series[0].points,
            vec![
                ChartPoint { date: d(1), value: 81.5 },
                ChartPoint { date: d(8), value: 81.0 },
            ]
        );
        assert_eq!(series[1].name, BODY_FAT_SERIES);
        assert_eq!(
            series[1].points,
            vec![
                ChartPoint { date: d(1), value: 18.0 },
                ChartPoint { date: d(8), value: 17.5 },
            ]
        );
    }
}
