//! The main entry point: station lookup, historical series, and the derived
//! per-station report.

use crate::config::ClientConfig;
use crate::error::WeatherError;
use crate::fetch::retrying_fetcher::RetryingFetcher;
use crate::fetch::transport::{HttpTransport, Transport};
use crate::location::LocationProvider;
use crate::stations::debounce::{debounced, QueryDebouncer, QueryInput};
use crate::stations::directory::StationDirectory;
use crate::stations::locate_station::{NearestMatch, NearestStationLocator};
use crate::stations::search_index::SearchIndex;
use crate::types::observation::{HistoricalWeather, ObservationPoint};
use crate::types::report::{DataSource, StationReport};
use crate::types::station::{LatLon, Station};
use crate::types::summary::{resolve_selected_date, CurrentConditions};
use crate::weather_data::aggregator::TimeSeriesAggregator;
use crate::weather_data::error::SeriesError;
use crate::weather_data::fallback::{fallback_historical, fallback_station};
use bon::bon;
use log::{info, warn};
use std::sync::{Arc, OnceLock};

/// Client for a station weather service.
///
/// Owns the retrying fetcher and the station directory; the station list is
/// fetched at most once per client, on first use.
///
/// # Examples
///
/// ```rust,no_run
/// # use stationwx::{StationWeather, WeatherError, LatLon};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherError> {
/// let client = StationWeather::new()?;
///
/// let nearest = client
///     .nearest_station()
///     .location(LatLon(32.75, -97.33))
///     .call()
///     .await?;
///
/// let report = client.report().station(&nearest.station).call().await?;
/// for day in &report.summaries {
///     println!("{}: {:.1} to {:.1}", day.date, day.temp_min, day.temp_max);
/// }
/// # Ok(())
/// # }
/// ```
pub struct StationWeather {
    config: ClientConfig,
    fetcher: RetryingFetcher,
    directory: StationDirectory,
    index: OnceLock<SearchIndex>,
}

#[bon]
impl StationWeather {
    /// Creates a client from [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Creates a client talking HTTP with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::HttpClient`] if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(WeatherError::HttpClient)?;
        Ok(Self::with_transport(
            config,
            Arc::new(HttpTransport::new(client)),
        ))
    }

    /// Creates a client over any [`Transport`].
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let fetcher = RetryingFetcher::new(transport, config.retry_policy);
        let directory = StationDirectory::new(fetcher.clone(), config.stations_url());
        Self {
            config,
            fetcher,
            directory,
            index: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// The full station list, loaded on first call.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Directory`] if the list could not be loaded. The
    /// next call tries again.
    pub async fn stations(&self) -> Result<Arc<[Station]>, WeatherError> {
        Ok(self.directory.load().await?)
    }

    /// Stations whose name, name without qualifiers, or id prefix matches `query`.
    ///
    /// `limit` defaults to [`ClientConfig::search_limit`] and cannot exceed it.
    #[builder]
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Station>, WeatherError> {
        let stations = self.stations().await?;
        let index = self
            .index
            .get_or_init(|| SearchIndex::build(&stations).with_limit(self.config.search_limit));
        let limit = limit
            .unwrap_or(self.config.search_limit)
            .min(self.config.search_limit);
        Ok(index
            .query_limited(query, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// A query input plus its debounced reader, using the configured quiet period.
    pub fn search_input(&self) -> (QueryInput, QueryDebouncer) {
        debounced(self.config.search_debounce)
    }

    /// The station closest to `location`, or the fallback station when there is
    /// no location.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::LocationUnavailable`] if nothing could be picked,
    /// or [`WeatherError::Directory`] if the station list failed to load.
    #[builder]
    pub async fn nearest_station(
        &self,
        location: Option<LatLon>,
    ) -> Result<NearestMatch, WeatherError> {
        let stations = self.stations().await?;
        NearestStationLocator::new(&stations)
            .with_fallback(&self.config.fallback_station_id)
            .locate(location)
            .ok_or_else(|| WeatherError::LocationUnavailable {
                fallback_id: self.config.fallback_station_id.clone(),
            })
    }

    /// Like [`StationWeather::nearest_station`], asking `provider` for the
    /// location. A denial falls back to the fallback station; the returned
    /// match then reports [`NearestMatch::is_fallback`].
    pub async fn nearest_station_from(
        &self,
        provider: &dyn LocationProvider,
    ) -> Result<NearestMatch, WeatherError> {
        let location = match provider.request_location().await {
            Ok(coordinate) => Some(coordinate),
            Err(denied) => {
                info!("{}; using station {}", denied, self.config.fallback_station_id);
                None
            }
        };
        self.nearest_station().maybe_location(location).call().await
    }

    /// Fetches the historical series of `station_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Fetch`] once every retry failed, or
    /// [`WeatherError::Schema`] if the body is JSON of the wrong shape.
    pub async fn historical(&self, station_id: &str) -> Result<HistoricalWeather, WeatherError> {
        let url = self.config.historical_url(station_id);
        let value = self.fetcher.fetch(&url).await?;
        serde_json::from_value(value).map_err(|source| WeatherError::Schema { url, source })
    }

    /// Fetches and summarizes `station`'s series.
    ///
    /// If the fetch fails, the report is built from the built-in fallback
    /// dataset instead and marked [`DataSource::Fallback`]. A series without
    /// points yields a report with no summaries rather than an error.
    ///
    /// `selected_date` picks the day for the hourly series; it defaults to the
    /// most recent day.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Series`] if aggregation itself fails.
    #[builder]
    pub async fn report(
        &self,
        station: &Station,
        selected_date: Option<&str>,
    ) -> Result<StationReport, WeatherError> {
        let (station, source, weather) = match self.historical(&station.station_id).await {
            Ok(weather) => (station.clone(), DataSource::Live, weather),
            Err(e) => {
                warn!(
                    "Showing fallback data instead of station {}: {}",
                    station.station_id, e
                );
                (
                    fallback_station(),
                    DataSource::Fallback {
                        reason: e.to_string(),
                    },
                    fallback_historical(),
                )
            }
        };

        let points = match weather.into_points() {
            Ok(points) => points,
            Err(SeriesError::NoData { station }) => {
                info!("Station {} returned no observations", station);
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        build_report(station, source, &points, selected_date)
    }
}

fn build_report(
    station: Station,
    source: DataSource,
    points: &[ObservationPoint],
    selected_date: Option<&str>,
) -> Result<StationReport, WeatherError> {
    let aggregator = TimeSeriesAggregator::new(&station.station_id);
    let summaries = aggregator.summarize(points)?;
    let selected_date = resolve_selected_date(&summaries, selected_date);
    let hourly = match &selected_date {
        Some(date) => Some(aggregator.hourly_series(points, date)?),
        None => None,
    };
    Ok(StationReport {
        current: CurrentConditions::from_points(points),
        station,
        source,
        summaries,
        selected_date,
        hourly,
    })
}
