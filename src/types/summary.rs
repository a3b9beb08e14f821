//! Derived, display-ready views of an observation series.

use crate::types::observation::ObservationPoint;
use crate::types::wind::CompassDirection;
use chrono::NaiveDate;
use serde::Serialize;

/// Aggregate over one calendar day's points.
///
/// A day with no usable temperature reports `temp_min == temp_max == 0.0`; use
/// [`DailySummary::has_temperature`] rather than the value to detect that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// `YYYY-MM-DD` grouping key.
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    /// `round(mean(dewpoint) / mean(temperature) * 100)`. A rough stand-in for
    /// relative humidity, not a physical quantity.
    pub humidity: i64,
    /// Mean scalar wind speed over points that carried a wind vector. Not
    /// rounded; round it when displaying.
    pub wind_speed: f64,
    /// Number of points grouped into this day, with or without a temperature.
    pub point_count: usize,
    pub temperature_count: usize,
    pub dewpoint_count: usize,
    pub wind_count: usize,
}

impl DailySummary {
    pub fn has_temperature(&self) -> bool {
        self.temperature_count > 0
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// One (time-of-day, temperature) sample of the selected day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyReading {
    pub time: String,
    pub temperature: f64,
}

/// Outcome of asking for one day's hourly temperatures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HourlySeries {
    Readings {
        date: String,
        readings: Vec<HourlyReading>,
    },
    /// No point of the series carries a temperature on `date`.
    NoDataForDate { date: String },
}

impl HourlySeries {
    pub fn date(&self) -> &str {
        match self {
            HourlySeries::Readings { date, .. } | HourlySeries::NoDataForDate { date } => date,
        }
    }

    pub fn readings(&self) -> &[HourlyReading] {
        match self {
            HourlySeries::Readings { readings, .. } => readings,
            HourlySeries::NoDataForDate { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.readings().is_empty()
    }
}

/// The latest reading of a series, as shown in a "current weather" panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub timestamp: String,
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
    /// 0 when the point had no wind vector.
    pub wind_speed: f64,
    /// `N` when the point had no wind vector.
    pub wind_direction: CompassDirection,
    pub pressure: Option<f64>,
    /// 0 when absent.
    pub precipitation: f64,
}

impl CurrentConditions {
    /// Conditions from the last point in input order, or `None` for an empty series.
    pub fn from_points(points: &[ObservationPoint]) -> Option<Self> {
        let latest = points.last()?;
        let (wind_speed, wind_direction) = match latest.wind {
            Some(w) => (w.speed(), w.direction()),
            None => (0.0, CompassDirection::N),
        };
        Some(Self {
            timestamp: latest.timestamp.clone(),
            temperature: latest.temperature,
            dewpoint: latest.dewpoint,
            wind_speed,
            wind_direction,
            pressure: latest.pressure,
            precipitation: latest.precipitation.unwrap_or(0.0),
        })
    }
}

/// Picks the date to show hourly data for: the caller's explicit choice when it
/// made one, otherwise the most recent day.
pub fn resolve_selected_date(
    summaries: &[DailySummary],
    explicit: Option<&str>,
) -> Option<String> {
    match explicit {
        Some(date) if !date.is_empty() => Some(date.to_string()),
        _ => summaries.first().map(|s| s.date.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::wind::WindVector;

    fn summary(date: &str) -> DailySummary {
        DailySummary {
            date: date.to_string(),
            temp_min: 0.0,
            temp_max: 0.0,
            humidity: 0,
            wind_speed: 0.0,
            point_count: 1,
            temperature_count: 0,
            dewpoint_count: 0,
            wind_count: 0,
        }
    }

    #[test]
    fn test_default_selection_is_first_summary() {
        let s = vec![summary("2025-09-07"), summary("2025-09-06")];
        assert_eq!(resolve_selected_date(&s, None).as_deref(), Some("2025-09-07"));
        assert_eq!(resolve_selected_date(&s, Some("")).as_deref(), Some("2025-09-07"));
    }

    #[test]
    fn test_explicit_selection_wins() {
        let s = vec![summary("2025-09-07"), summary("2025-09-06")];
        assert_eq!(
            resolve_selected_date(&s, Some("2025-09-06")).as_deref(),
            Some("2025-09-06")
        );
        assert_eq!(resolve_selected_date(&[], None), None);
    }

    #[test]
    fn test_zero_temperature_day_is_not_data() {
        let s = summary("2025-09-07");
        assert!(!s.has_temperature());
        assert_eq!(s.naive_date(), NaiveDate::from_ymd_opt(2025, 9, 7));
    }

    #[test]
    fn test_current_conditions_use_last_point() {
        let points = vec![
            ObservationPoint {
                timestamp: "2025-09-07 12:00".into(),
                temperature: Some(30.0),
                dewpoint: Some(18.0),
                wind: None,
                pressure: None,
                precipitation: None,
            },
            ObservationPoint {
                timestamp: "2025-09-07 13:00".into(),
                temperature: Some(31.0),
                dewpoint: None,
                wind: Some(WindVector::new(0.0, 2.0)),
                pressure: Some(1011.5),
                precipitation: None,
            },
        ];
        let now = CurrentConditions::from_points(&points).unwrap();
        assert_eq!(now.timestamp, "2025-09-07 13:00");
        assert_eq!(now.temperature, Some(31.0));
        assert_eq!(now.wind_speed, 2.0);
        assert_eq!(now.wind_direction, CompassDirection::E);
        assert_eq!(now.precipitation, 0.0);
        assert!(CurrentConditions::from_points(&[]).is_none());
    }
}
