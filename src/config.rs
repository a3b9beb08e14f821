use crate::fetch::retrying_fetcher::RetryPolicy;
use crate::stations::debounce::DEFAULT_DEBOUNCE;
use crate::stations::locate_station::DEFAULT_FALLBACK_STATION;
use crate::stations::search_index::SearchIndex;
use bon::Builder;
use log::debug;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "STATIONWX_BASE_URL";

/// Settings for a [`crate::StationWeather`] client.
///
/// # Examples
///
/// ```
/// use stationwx::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("https://wx.example.org/api/")
///     .request_timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(config.fallback_station_id, "GKY");
/// assert_eq!(config.stations_url(), "https://wx.example.org/api/stations");
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClientConfig {
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Station shown when no coordinate is available.
    #[builder(into, default = DEFAULT_FALLBACK_STATION.to_string())]
    pub fallback_station_id: String,
    #[builder(default)]
    pub retry_policy: RetryPolicy,
    #[builder(default = DEFAULT_DEBOUNCE)]
    pub search_debounce: Duration,
    #[builder(default = SearchIndex::DEFAULT_LIMIT)]
    pub search_limit: usize,
    /// Per-request timeout of the HTTP client. Each retry attempt gets its own.
    #[builder(default = Duration::from_secs(30))]
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `STATIONWX_BASE_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!("Using base URL from {}: {}", BASE_URL_ENV, url);
                Self::builder().base_url(url.trim()).build()
            }
            _ => Self::default(),
        }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn stations_url(&self) -> String {
        format!("{}/stations", self.base())
    }

    pub fn historical_url(&self, station_id: &str) -> String {
        format!(
            "{}/historical_weather?station={}",
            self.base(),
            urlencoding::encode(station_id)
        )
    }
}
