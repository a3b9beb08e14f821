use crate::fetch::error::FetchError;
use crate::stations::error::DirectoryError;
use crate::weather_data::error::SeriesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("Historical weather from {url} has an unexpected shape")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No station matched: the directory is empty, the coordinate was not
    /// finite, or there was no coordinate and the fallback station is unknown.
    #[error("No station for this location (fallback station '{fallback_id}')")]
    LocationUnavailable { fallback_id: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
