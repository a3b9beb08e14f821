//! Wire shapes of the `/historical_weather` endpoint and the canonical
//! [`ObservationPoint`] every record is normalized into before aggregation.

use crate::types::wind::WindVector;
use crate::weather_data::error::SeriesError;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a JSON number, a numeric string, or null. Anything that is not a finite
/// number becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Raw::Other(_)) | None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// A record in the current `points` format, with wind as two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dewpoint: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precip: Option<f64>,
}

/// A record in the legacy `observations` format, with wind as speed plus a compass
/// name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyObservation {
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dewpoint: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precipitation: Option<f64>,
}

/// Either wire variant of a single observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationRecord {
    Vector(WeatherPoint),
    Legacy(LegacyObservation),
}

/// The canonical observation shape the aggregator works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    /// ISO-like timestamp whose first 10 characters are the calendar date.
    pub timestamp: String,
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
    /// Present only when both components (or both legacy speed and direction) were.
    pub wind: Option<WindVector>,
    pub pressure: Option<f64>,
    pub precipitation: Option<f64>,
}

impl ObservationPoint {
    /// The `YYYY-MM-DD` grouping key, or `None` when the timestamp is too short.
    pub fn date_key(&self) -> Option<&str> {
        self.timestamp.get(..10)
    }

    /// The part of the timestamp after the date, without the `T` or space separator.
    pub fn time_of_day(&self) -> &str {
        self.timestamp
            .get(10..)
            .unwrap_or_default()
            .trim_start_matches(&['T', ' '][..])
    }
}

impl From<WeatherPoint> for ObservationPoint {
    fn from(p: WeatherPoint) -> Self {
        let wind = match (p.wind_x, p.wind_y) {
            (Some(x), Some(y)) => Some(WindVector::new(x, y)),
            _ => None,
        };
        Self {
            timestamp: p.timestamp,
            temperature: p.temperature,
            dewpoint: p.dewpoint,
            wind,
            pressure: p.pressure,
            precipitation: p.precip,
        }
    }
}

impl From<LegacyObservation> for ObservationPoint {
    fn from(o: LegacyObservation) -> Self {
        let wind = match (o.wind_speed, o.wind_direction.as_deref()) {
            (Some(speed), Some(compass)) => match WindVector::from_speed_and_compass(speed, compass)
            {
                Ok(v) => Some(v),
                Err(e) => {
                    debug!("Dropping wind for {}: {}", o.timestamp, e);
                    None
                }
            },
            _ => None,
        };
        Self {
            timestamp: o.timestamp,
            temperature: o.temperature,
            dewpoint: o.dewpoint,
            wind,
            pressure: o.pressure,
            precipitation: o.precipitation,
        }
    }
}

impl From<ObservationRecord> for ObservationPoint {
    fn from(record: ObservationRecord) -> Self {
        match record {
            ObservationRecord::Vector(p) => p.into(),
            ObservationRecord::Legacy(o) => o.into(),
        }
    }
}

/// Response body of `GET {base}/historical_weather?station={id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalWeather {
    /// Station id echoed back by the server.
    pub station: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub points_count: Option<u64>,
    #[serde(default)]
    pub observations: Option<Vec<LegacyObservation>>,
    #[serde(default)]
    pub points: Option<Vec<WeatherPoint>>,
}

impl HistoricalWeather {
    /// The records of whichever variant the response carries. `points` wins when
    /// both are non-empty.
    pub fn records(&self) -> Vec<ObservationRecord> {
        match (&self.points, &self.observations) {
            (Some(points), _) if !points.is_empty() => points
                .iter()
                .cloned()
                .map(ObservationRecord::Vector)
                .collect(),
            (_, Some(obs)) => obs.iter().cloned().map(ObservationRecord::Legacy).collect(),
            _ => Vec::new(),
        }
    }

    /// Normalizes the response into canonical points.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NoData`] if neither variant carries any record.
    pub fn into_points(self) -> Result<Vec<ObservationPoint>, SeriesError> {
        let points: Vec<ObservationPoint> =
            self.records().into_iter().map(ObservationPoint::from).collect();
        if points.is_empty() {
            return Err(SeriesError::NoData {
                station: self.station,
            });
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::wind::CompassDirection;

    #[test]
    fn test_points_variant_normalizes() {
        let json = r#"{
            "station": "GKY",
            "points": [
                {"timestamp": "2025-09-07 13:00", "temperature": 31.5, "wind_x": 3.0, "wind_y": 4.0,
                 "dewpoint": 20.1, "pressure": 1012.0, "precip": 0.0}
            ]
        }"#;
        let hw: HistoricalWeather = serde_json::from_str(json).unwrap();
        let points = hw.into_points().unwrap();
        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert_eq!(p.temperature, Some(31.5));
        assert_eq!(p.wind.map(|w| w.speed()), Some(5.0));
        assert_eq!(p.precipitation, Some(0.0));
        assert_eq!(p.date_key(), Some("2025-09-07"));
        assert_eq!(p.time_of_day(), "13:00");
    }

    #[test]
    fn test_legacy_variant_normalizes() {
        let json = r#"{
            "station": "GKY",
            "observations": [
                {"timestamp": "2025-09-06T08:00:00", "temperature": 24, "dewpoint": 18,
                 "wind_speed": 5, "wind_direction": "E", "pressure": null, "precipitation": 0.2}
            ]
        }"#;
        let hw: HistoricalWeather = serde_json::from_str(json).unwrap();
        let points = hw.into_points().unwrap();
        let p = &points[0];
        assert_eq!(p.temperature, Some(24.0));
        assert_eq!(p.pressure, None);
        let wind = p.wind.unwrap();
        assert_eq!(wind.direction(), CompassDirection::E);
        assert!((wind.speed() - 5.0).abs() < 1e-9);
        assert_eq!(p.time_of_day(), "08:00:00");
    }

    #[test]
    fn test_single_wind_component_drops_wind() {
        let p: WeatherPoint =
            serde_json::from_str(r#"{"timestamp": "2025-09-07 01:00", "wind_x": 2.0}"#).unwrap();
        assert_eq!(ObservationPoint::from(p).wind, None);
    }

    #[test]
    fn test_non_numeric_temperature_becomes_none() {
        let p: WeatherPoint = serde_json::from_str(
            r#"{"timestamp": "2025-09-07 01:00", "temperature": "M", "dewpoint": "12.5"}"#,
        )
        .unwrap();
        assert_eq!(p.temperature, None);
        assert_eq!(p.dewpoint, Some(12.5));
    }

    #[test]
    fn test_structured_value_becomes_none() {
        let p: WeatherPoint = serde_json::from_str(
            r#"{"timestamp": "2025-09-07 01:00", "temperature": {"v": 3}, "pressure": [1, 2], "precip": true}"#,
        )
        .unwrap();
        assert_eq!(p.temperature, None);
        assert_eq!(p.pressure, None);
        assert_eq!(p.precip, None);
    }

    #[test]
    fn test_points_preferred_over_observations() {
        let json = r#"{
            "station": "GKY",
            "observations": [{"timestamp": "2025-09-01 00:00", "temperature": 1}],
            "points": [{"timestamp": "2025-09-07 00:00", "temperature": 2}]
        }"#;
        let hw: HistoricalWeather = serde_json::from_str(json).unwrap();
        let points = hw.into_points().unwrap();
        assert_eq!(points[0].timestamp, "2025-09-07 00:00");
    }

    #[test]
    fn test_empty_points_fall_back_to_observations() {
        let json = r#"{
            "station": "GKY",
            "observations": [{"timestamp": "2025-09-01 00:00", "temperature": 1}],
            "points": []
        }"#;
        let hw: HistoricalWeather = serde_json::from_str(json).unwrap();
        assert_eq!(hw.into_points().unwrap()[0].timestamp, "2025-09-01 00:00");
    }

    #[test]
    fn test_absent_series_is_no_data() {
        let hw: HistoricalWeather = serde_json::from_str(r#"{"station": "GKY"}"#).unwrap();
        assert!(matches!(
            hw.into_points(),
            Err(SeriesError::NoData { station }) if station == "GKY"
        ));
    }

    #[test]
    fn test_short_timestamp_has_no_date_key() {
        let p = ObservationPoint {
            timestamp: "2025-09".to_string(),
            temperature: None,
            dewpoint: None,
            wind: None,
            pressure: None,
            precipitation: None,
        };
        assert_eq!(p.date_key(), None);
        assert_eq!(p.time_of_day(), "");
    }
}
