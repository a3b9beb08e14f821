//! Built-in dataset shown when the historical series cannot be fetched.

use crate::types::observation::{HistoricalWeather, WeatherPoint};
use crate::types::station::Station;

/// Date selected by default when showing the fallback dataset.
pub const FALLBACK_SELECTED_DATE: &str = "2025-09-07";

pub fn fallback_station() -> Station {
    Station {
        station_id: "GKY".to_string(),
        station_name: "Arlington (Municipal Airport)".to_string(),
        station_network: "TX_ASOS".to_string(),
        latitude: 32.66,
        longitude: -97.09,
        elevation: 191.0,
        timezone: "America/Chicago".to_string(),
    }
}

// (timestamp, temperature, wind_x, wind_y, dewpoint, pressure, precip)
type Row = (&'static str, f64, f64, f64, f64, f64, f64);

const ROWS: [Row; 8] = [
    ("2025-09-06T06:00:00", 24.4, 1.2, 2.1, 20.6, 1013.2, 0.0),
    ("2025-09-06T12:00:00", 30.6, 2.4, 3.3, 19.4, 1012.8, 0.0),
    ("2025-09-06T15:00:00", 33.3, 3.1, 2.6, 18.9, 1011.6, 0.0),
    ("2025-09-06T21:00:00", 28.9, 1.8, 1.1, 20.0, 1012.4, 0.0),
    ("2025-09-07T06:00:00", 23.9, 0.6, 1.9, 20.6, 1013.9, 0.0),
    ("2025-09-07T12:00:00", 29.4, -1.5, 2.8, 19.4, 1013.5, 0.3),
    ("2025-09-07T15:00:00", 32.2, -2.2, 3.4, 18.3, 1012.2, 0.0),
    ("2025-09-07T21:00:00", 27.8, -0.9, 1.6, 19.4, 1013.0, 0.0),
];

/// Two days of readings for [`fallback_station`], in the `points` shape.
pub fn fallback_historical() -> HistoricalWeather {
    let points: Vec<WeatherPoint> = ROWS
        .iter()
        .map(|&(timestamp, temp, x, y, dew, pres, precip)| WeatherPoint {
            timestamp: timestamp.to_string(),
            temperature: Some(temp),
            wind_x: Some(x),
            wind_y: Some(y),
            dewpoint: Some(dew),
            pressure: Some(pres),
            precip: Some(precip),
        })
        .collect();
    HistoricalWeather {
        station: "GKY".to_string(),
        start_date: Some("2025-09-06".to_string()),
        end_date: Some(FALLBACK_SELECTED_DATE.to_string()),
        points_count: Some(points.len() as u64),
        observations: None,
        points: Some(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::summary::resolve_selected_date;
    use crate::weather_data::aggregator::TimeSeriesAggregator;

    #[test]
    fn test_fallback_summarizes_to_two_days() {
        let points = fallback_historical().into_points().unwrap();
        let days = TimeSeriesAggregator::new("GKY").summarize(&points).unwrap();
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2025-09-07", "2025-09-06"]);
        assert_eq!(
            resolve_selected_date(&days, None).as_deref(),
            Some(FALLBACK_SELECTED_DATE)
        );
        assert_eq!(days[0].temp_max, 32.2);
        assert_eq!(days[1].temp_min, 24.4);
    }

    #[test]
    fn test_fallback_station_matches_dataset() {
        assert_eq!(fallback_station().station_id, fallback_historical().station);
    }
}
