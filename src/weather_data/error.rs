use polars::error::PolarsError;
use thiserror::Error;

/// Errors raised while turning an observation series into summaries.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The response carried neither `points` nor `observations`, or both were empty.
    #[error("No observations in the historical series for station '{station}'")]
    NoData { station: String },

    #[error("Required column '{column}' not found in DataFrame for station {station}")]
    ColumnNotFound {
        station: String,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Polars operation failed for station {station}: {source}")]
    PolarsError {
        station: String,
        #[source]
        source: PolarsError,
    },
}
