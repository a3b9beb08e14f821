//! Reduces an observation series to per-day summaries and one day's hourly
//! temperatures.

use crate::types::observation::ObservationPoint;
use crate::types::summary::{DailySummary, HourlyReading, HourlySeries};
use crate::weather_data::error::SeriesError;
use crate::weather_data::extractor::*;
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::*;

/// Groups a station's points by calendar day.
///
/// Points are grouped by the first 10 characters of their timestamp; the input
/// need not be sorted. Missing optional fields never fail an aggregation, they
/// only shrink the sample the affected field is computed from.
#[derive(Debug, Clone)]
pub struct TimeSeriesAggregator {
    station_id: String,
}

impl TimeSeriesAggregator {
    pub fn new(station_id: &str) -> Self {
        Self {
            station_id: station_id.to_string(),
        }
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// One [`DailySummary`] per distinct date, most recent date first.
    ///
    /// Points whose timestamp does not start with a valid `YYYY-MM-DD` date are
    /// skipped.
    pub fn summarize(&self, points: &[ObservationPoint]) -> Result<Vec<DailySummary>, SeriesError> {
        let frame = self.points_frame(points)?;
        if frame.height() == 0 {
            return Ok(Vec::new());
        }

        let daily = frame
            .lazy()
            .group_by_stable([col(COL_DATE)])
            .agg([
                len().cast(DataType::UInt32).alias(COL_POINTS),
                col(COL_TEMP).min().alias(COL_TMIN),
                col(COL_TEMP).max().alias(COL_TMAX),
                col(COL_TEMP).mean().alias(COL_TAVG),
                col(COL_DWPT).mean().alias(COL_DAVG),
                col(COL_WSPD).mean().alias(COL_WAVG),
                non_null_count(COL_TEMP).alias(COL_TEMP_N),
                non_null_count(COL_DWPT).alias(COL_DWPT_N),
                non_null_count(COL_WSPD).alias(COL_WSPD_N),
            ])
            .sort_by_exprs(
                vec![col(COL_DATE)],
                SortMultipleOptions::default().with_order_descending(true),
            )
            .collect()
            .map_err(|e| self.polars_error(e))?;

        let reader = FrameReader::new(&daily, &self.station_id);
        let dates = reader.strings(COL_DATE)?;
        let tmin = reader.floats(COL_TMIN)?;
        let tmax = reader.floats(COL_TMAX)?;
        let tavg = reader.floats(COL_TAVG)?;
        let davg = reader.floats(COL_DAVG)?;
        let wavg = reader.floats(COL_WAVG)?;
        let n_points = reader.counts(COL_POINTS)?;
        let n_temp = reader.counts(COL_TEMP_N)?;
        let n_dwpt = reader.counts(COL_DWPT_N)?;
        let n_wspd = reader.counts(COL_WSPD_N)?;

        let summaries: Vec<DailySummary> = (0..reader.height())
            .filter_map(|i| {
                Some(DailySummary {
                    date: dates.get(i)?.to_string(),
                    temp_min: tmin.get(i).unwrap_or(0.0),
                    temp_max: tmax.get(i).unwrap_or(0.0),
                    humidity: humidity_proxy(davg.get(i), tavg.get(i)),
                    wind_speed: wavg.get(i).unwrap_or(0.0),
                    point_count: get_count(n_points, i),
                    temperature_count: get_count(n_temp, i),
                    dewpoint_count: get_count(n_dwpt, i),
                    wind_count: get_count(n_wspd, i),
                })
            })
            .collect();
        debug!(
            "Summarized {} points into {} days for station {}",
            points.len(),
            summaries.len(),
            self.station_id
        );
        Ok(summaries)
    }

    /// Temperatures recorded on `date`, in input order, keyed by the time of day.
    ///
    /// Returns [`HourlySeries::NoDataForDate`] when no point on that date has a
    /// temperature.
    pub fn hourly_series(
        &self,
        points: &[ObservationPoint],
        date: &str,
    ) -> Result<HourlySeries, SeriesError> {
        let frame = self.points_frame(points)?;
        let day = frame
            .lazy()
            .filter(
                col(COL_DATE)
                    .eq(lit(date.to_string()))
                    .and(col(COL_TEMP).is_not_null()),
            )
            .select([col(COL_TIME), col(COL_TEMP)])
            .collect()
            .map_err(|e| self.polars_error(e))?;

        let reader = FrameReader::new(&day, &self.station_id);
        let times = reader.strings(COL_TIME)?;
        let temps = reader.floats(COL_TEMP)?;
        let readings: Vec<HourlyReading> = (0..reader.height())
            .filter_map(|i| {
                Some(HourlyReading {
                    time: times.get(i)?.to_string(),
                    temperature: temps.get(i)?,
                })
            })
            .collect();

        if readings.is_empty() {
            debug!("No temperatures on {} for station {}", date, self.station_id);
            return Ok(HourlySeries::NoDataForDate {
                date: date.to_string(),
            });
        }
        Ok(HourlySeries::Readings {
            date: date.to_string(),
            readings,
        })
    }

    /// Lays the usable points out as columns. Points without a valid date
    /// prefix are dropped here.
    fn points_frame(&self, points: &[ObservationPoint]) -> Result<DataFrame, SeriesError> {
        let mut dates: Vec<&str> = Vec::with_capacity(points.len());
        let mut times: Vec<&str> = Vec::with_capacity(points.len());
        let mut temps: Vec<Option<f64>> = Vec::with_capacity(points.len());
        let mut dwpts: Vec<Option<f64>> = Vec::with_capacity(points.len());
        let mut wspds: Vec<Option<f64>> = Vec::with_capacity(points.len());

        for point in points {
            let Some(date) = point.date_key().filter(|d| is_calendar_date(d)) else {
                warn!(
                    "Skipping point with malformed timestamp '{}' for station {}",
                    point.timestamp, self.station_id
                );
                continue;
            };
            dates.push(date);
            times.push(point.time_of_day());
            temps.push(point.temperature);
            dwpts.push(point.dewpoint);
            wspds.push(point.wind.map(|w| w.speed()));
        }

        df!(
            COL_DATE => dates,
            COL_TIME => times,
            COL_TEMP => temps,
            COL_DWPT => dwpts,
            COL_WSPD => wspds
        )
        .map_err(|e| self.polars_error(e))
    }

    fn polars_error(&self, source: PolarsError) -> SeriesError {
        SeriesError::PolarsError {
            station: self.station_id.clone(),
            source,
        }
    }
}

fn non_null_count(column: &str) -> Expr {
    col(column)
        .is_not_null()
        .sum()
        .cast(DataType::UInt32)
}

fn is_calendar_date(key: &str) -> bool {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok()
}

/// `round(mean dewpoint / mean temperature * 100)`, or 0 when either mean is
/// missing or the temperature mean is zero.
///
/// The ratio of two temperatures is not a relative humidity; it is kept as a
/// display value only.
pub fn humidity_proxy(dewpoint_mean: Option<f64>, temperature_mean: Option<f64>) -> i64 {
    match (dewpoint_mean, temperature_mean) {
        (Some(d), Some(t)) if t != 0.0 => (d / t * 100.0).round() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::wind::WindVector;

    fn point(
        ts: &str,
        temp: Option<f64>,
        dew: Option<f64>,
        wind: Option<(f64, f64)>,
    ) -> ObservationPoint {
        ObservationPoint {
            timestamp: ts.to_string(),
            temperature: temp,
            dewpoint: dew,
            wind: wind.map(|(x, y)| WindVector::new(x, y)),
            pressure: None,
            precipitation: None,
        }
    }

    fn agg() -> TimeSeriesAggregator {
        TimeSeriesAggregator::new("GKY")
    }

    #[test]
    fn test_days_are_sorted_descending() {
        let points = vec![
            point("2025-09-06 10:00", Some(25.0), Some(18.0), None),
            point("2025-09-07 10:00", Some(30.0), Some(20.0), None),
            point("2025-09-06 14:00", Some(29.0), Some(17.0), None),
        ];
        let days = agg().summarize(&points).unwrap();
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2025-09-07", "2025-09-06"]);

        let sept6 = &days[1];
        assert_eq!(sept6.temp_min, 25.0);
        assert_eq!(sept6.temp_max, 29.0);
        assert_eq!(sept6.point_count, 2);
    }

    #[test]
    fn test_every_date_is_represented_once() {
        let points = vec![
            point("2025-09-05T23:00", Some(20.0), None, None),
            point("2025-09-07T01:00", Some(21.0), None, None),
            point("2025-09-05T01:00", Some(19.0), None, None),
            point("2025-09-06T12:00", Some(28.0), None, None),
            point("2025-09-07T02:00", Some(22.0), None, None),
        ];
        let days = agg().summarize(&points).unwrap();
        assert_eq!(days.len(), 3);
        let total: usize = days.iter().map(|d| d.point_count).sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn test_null_temperature_still_contributes_its_date() {
        let points = vec![
            point("2025-09-07 10:00", Some(30.0), None, None),
            point("2025-09-08 10:00", None, Some(12.0), None),
        ];
        let days = agg().summarize(&points).unwrap();
        assert_eq!(days.len(), 2);
        let sept8 = &days[0];
        assert_eq!(sept8.date, "2025-09-08");
        assert_eq!(sept8.temp_min, 0.0);
        assert_eq!(sept8.temp_max, 0.0);
        assert!(!sept8.has_temperature());
        assert_eq!(sept8.dewpoint_count, 1);
        assert_eq!(sept8.humidity, 0);
    }

    #[test]
    fn test_humidity_proxy_and_wind_mean() {
        let points = vec![
            point("2025-09-07 10:00", Some(30.0), Some(20.0), Some((3.0, 4.0))),
            point("2025-09-07 11:00", Some(10.0), Some(10.0), None),
            point("2025-09-07 12:00", None, None, Some((0.0, 1.0))),
        ];
        let days = agg().summarize(&points).unwrap();
        let day = &days[0];
        // mean dew 15 / mean temp 20
        assert_eq!(day.humidity, 75);
        assert_eq!(day.wind_speed, 3.0);
        assert_eq!(day.wind_count, 2);
        assert_eq!(day.temperature_count, 2);
    }

    #[test]
    fn test_wind_mean_is_not_rounded() {
        let points = vec![
            point("2025-09-07 10:00", Some(30.0), None, Some((3.0, 4.0))),
            point("2025-09-07 11:00", Some(31.0), None, Some((0.0, 2.0))),
        ];
        let day = &agg().summarize(&points).unwrap()[0];
        assert!((day.wind_speed - 3.5).abs() < 1e-9);
        assert_eq!(day.wind_count, 2);
    }

    #[test]
    fn test_humidity_proxy_edges() {
        assert_eq!(humidity_proxy(None, Some(20.0)), 0);
        assert_eq!(humidity_proxy(Some(5.0), None), 0);
        assert_eq!(humidity_proxy(Some(5.0), Some(0.0)), 0);
        assert_eq!(humidity_proxy(Some(1.0), Some(8.0)), 13); // 12.5 rounds away from zero
        assert_eq!(humidity_proxy(Some(-5.0), Some(2.0)), -250);
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let points = vec![
            point("garbage", Some(1.0), None, None),
            point("2025-13-40 00:00", Some(2.0), None, None),
            point("2025-09-07 00:00", Some(3.0), None, None),
        ];
        let days = agg().summarize(&points).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].point_count, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(agg().summarize(&[]).unwrap().is_empty());
        let hourly = agg().hourly_series(&[], "2025-09-07").unwrap();
        assert_eq!(hourly, HourlySeries::NoDataForDate { date: "2025-09-07".into() });
    }

    #[test]
    fn test_hourly_series_keeps_input_order() {
        let points = vec![
            point("2025-09-07 13:00", Some(31.0), None, None),
            point("2025-09-06 13:00", Some(28.0), None, None),
            point("2025-09-07 09:00", Some(24.0), None, None),
            point("2025-09-07 10:00", None, None, None),
        ];
        let series = agg().hourly_series(&points, "2025-09-07").unwrap();
        assert_eq!(series.date(), "2025-09-07");
        assert_eq!(
            series.readings(),
            [
                HourlyReading { time: "13:00".into(), temperature: 31.0 },
                HourlyReading { time: "09:00".into(), temperature: 24.0 },
            ]
        );
    }

    #[test]
    fn test_hourly_series_without_temperatures_is_no_data() {
        let points = vec![point("2025-09-07 13:00", None, Some(10.0), None)];
        let series = agg().hourly_series(&points, "2025-09-07").unwrap();
        assert!(matches!(series, HourlySeries::NoDataForDate { .. }));
        assert!(series.is_empty());
    }
}
