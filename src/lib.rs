mod config;
mod error;
mod fetch;
mod location;
mod records;
mod station_weather;
mod stations;
mod types;
mod weather_data;

pub use config::*;
pub use error::WeatherError;
pub use station_weather::*;

pub use fetch::error::{FetchError, FetchErrorKind};
pub use fetch::retrying_fetcher::{RetryPolicy, RetryState, RetryingFetcher};
pub use fetch::transport::{HttpTransport, Transport, TransportError, TransportResponse};

pub use stations::debounce::{debounced, QueryDebouncer, QueryInput, DEFAULT_DEBOUNCE};
pub use stations::directory::StationDirectory;
pub use stations::error::DirectoryError;
pub use stations::locate_station::*;
pub use stations::search_index::{alias, normalize, SearchIndex, SearchIndexEntry};

pub use types::observation::*;
pub use types::report::*;
pub use types::station::*;
pub use types::summary::*;
pub use types::wind;
pub use types::wind::{CompassDirection, UnknownCompassDirection, WindVector};

pub use weather_data::aggregator::{humidity_proxy, TimeSeriesAggregator};
pub use weather_data::error::SeriesError;
pub use weather_data::fallback::*;

pub use location::*;
pub use records::*;
