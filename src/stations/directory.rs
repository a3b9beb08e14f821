//! The loaded station list, shared by search and nearest-station lookup.

use crate::fetch::retrying_fetcher::RetryingFetcher;
use crate::stations::error::DirectoryError;
use crate::types::station::Station;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type LoadResult = Result<Arc<[Station]>, DirectoryError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

enum LoadState {
    Empty,
    Loading { generation: u64, load: SharedLoad },
    Loaded(Arc<[Station]>),
}

struct Inner {
    state: LoadState,
    generation: u64,
}

/// Owns the station set for its lifetime.
///
/// The first [`StationDirectory::load`] fetches the list; every caller that
/// arrives while that fetch is running awaits the same in-flight future, so at
/// most one request is ever outstanding. A successful result is kept until the
/// directory is dropped. A failed one is handed to every waiter and then
/// forgotten, so the next call starts over.
pub struct StationDirectory {
    fetcher: RetryingFetcher,
    url: String,
    inner: Mutex<Inner>,
}

impl StationDirectory {
    /// Creates an empty directory that will load from `url` on first use.
    pub fn new(fetcher: RetryingFetcher, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            inner: Mutex::new(Inner {
                state: LoadState::Empty,
                generation: 0,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the station set, loading it if nobody has yet.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Fetch`] when the fetch gave up, or
    /// [`DirectoryError::Schema`] when the response is not a list of stations.
    pub async fn load(&self) -> Result<Arc<[Station]>, DirectoryError> {
        let (generation, load) = {
            let mut inner = self.lock();
            let pending = match &inner.state {
                LoadState::Loaded(stations) => {
                    debug!("Station list cache hit ({} stations)", stations.len());
                    return Ok(stations.clone());
                }
                LoadState::Loading { generation, load } => Some((*generation, load.clone())),
                LoadState::Empty => None,
            };
            match pending {
                Some(pending) => {
                    debug!("Joining in-flight station list load");
                    pending
                }
                None => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let load = fetch_stations(self.fetcher.clone(), self.url.clone())
                        .boxed()
                        .shared();
                    inner.state = LoadState::Loading {
                        generation,
                        load: load.clone(),
                    };
                    (generation, load)
                }
            }
        };

        let result = load.await;

        let mut inner = self.lock();
        let still_current = matches!(
            &inner.state,
            LoadState::Loading { generation: g, .. } if *g == generation
        );
        if still_current {
            inner.state = match &result {
                Ok(stations) => LoadState::Loaded(stations.clone()),
                Err(_) => LoadState::Empty,
            };
        }
        result
    }

    /// The cached station set, without triggering a load.
    pub fn snapshot(&self) -> Option<Arc<[Station]>> {
        match &self.lock().state {
            LoadState::Loaded(stations) => Some(stations.clone()),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn fetch_stations(fetcher: RetryingFetcher, url: String) -> LoadResult {
    info!("Loading station list from {}", url);
    let value = fetcher.fetch(&url).await?;
    let stations: Vec<Station> =
        serde_json::from_value(value).map_err(|e| DirectoryError::Schema {
            url: url.clone(),
            message: e.to_string(),
        })?;
    info!("Loaded {} stations from {}", stations.len(), url);
    Ok(stations.into())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::error::FetchErrorKind;
    use crate::fetch::retrying_fetcher::RetryPolicy;
    use crate::fetch::transport::testing::ScriptedTransport;
    use futures_util::future::join_all;
    use std::time::Duration;

    const URL: &str = "http://wx.test/stations";

    pub(crate) const STATIONS_JSON: &str = r#"[
        {"station_id": "GKY", "station_name": "Arlington (Municipal Airport)", "station_network": "TX_ASOS",
         "latitude": 32.66, "longitude": -97.09, "elevation": 191.0, "timezone": "America/Chicago"},
        {"station_id": "DAL", "station_name": "Dallas Love Field", "station_network": "TX_ASOS",
         "latitude": 32.85, "longitude": -96.85, "elevation": 148.0, "timezone": "America/Chicago"},
        {"station_id": "STL", "station_name": "St. Louis (Downtown)", "station_network": "MO_ASOS",
         "latitude": 38.63, "longitude": -90.19, "elevation": 142.0, "timezone": "America/Chicago"}
    ]"#;

    fn directory(transport: &Arc<ScriptedTransport>) -> StationDirectory {
        StationDirectory::new(
            RetryingFetcher::new(transport.clone(), RetryPolicy::default()),
            URL,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_loads_share_one_request() {
        let transport = Arc::new(
            ScriptedTransport::with_latency(Duration::from_millis(100)).respond(200, STATIONS_JSON),
        );
        let dir = directory(&transport);

        let results = join_all((0..8).map(|_| dir.load())).await;

        assert_eq!(transport.call_count(), 1);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.len(), 3);
        for r in &results {
            assert!(Arc::ptr_eq(first, r.as_ref().unwrap()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loaded_set_is_cached() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, STATIONS_JSON));
        let dir = directory(&transport);
        assert!(dir.snapshot().is_none());

        let first = dir.load().await.unwrap();
        let second = dir.load().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(transport.call_count(), 1);
        assert!(dir.is_loaded());
        assert_eq!(dir.snapshot().unwrap()[0].station_id, "GKY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_is_shared_then_retried_from_scratch() {
        let transport = Arc::new(
            ScriptedTransport::with_latency(Duration::from_millis(10))
                .respond(503, "")
                .respond(503, "")
                .respond(503, "")
                .respond(200, STATIONS_JSON),
        );
        let dir = directory(&transport);

        let results = join_all((0..4).map(|_| dir.load())).await;
        for r in &results {
            let err = r.as_ref().unwrap_err();
            assert!(matches!(err, DirectoryError::Fetch(e) if e.kind() == FetchErrorKind::RetriesExhausted));
        }
        // One load, three attempts, regardless of the four callers.
        assert_eq!(transport.call_count(), 3);
        assert!(dir.snapshot().is_none());

        let stations = dir.load().await.unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_shape_is_schema_error() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, r#"{"stations": []}"#));
        let err = directory(&transport).load().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Schema { .. }));
        assert_eq!(transport.call_count(), 1);
    }
}
