//! In-memory favorites and search history.
//!
//! Both collections are keyed by station id and serialize with serde, so a
//! front end can persist them wherever it keeps user state.

use crate::types::station::Station;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in a [`SearchHistory`].
pub const HISTORY_CAPACITY: usize = 10;

/// A list of records identified by a string id.
pub trait RecordStore {
    type Record;

    fn add(&mut self, record: Self::Record);
    fn remove(&mut self, id: &str);
    fn list(&self) -> &[Self::Record];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub station: Station,
    pub searched_at: DateTime<Utc>,
}

impl SearchRecord {
    pub fn now(station: Station) -> Self {
        Self {
            station,
            searched_at: Utc::now(),
        }
    }
}

/// Recently opened stations, most recent first, at most
/// [`HISTORY_CAPACITY`] of them. Opening a station again moves it to the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<SearchRecord>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RecordStore for SearchHistory {
    type Record = SearchRecord;

    fn add(&mut self, record: SearchRecord) {
        self.entries
            .retain(|e| e.station.station_id != record.station.station_id);
        self.entries.insert(0, record);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.station.station_id != id);
    }

    fn list(&self) -> &[SearchRecord] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteStation {
    pub station: Station,
    pub added_at: DateTime<Utc>,
}

impl FavoriteStation {
    pub fn now(station: Station) -> Self {
        Self {
            station,
            added_at: Utc::now(),
        }
    }
}

/// Stations the user pinned, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<FavoriteStation>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_favorite(&self, station_id: &str) -> bool {
        self.entries.iter().any(|f| f.station.station_id == station_id)
    }
}

impl RecordStore for Favorites {
    type Record = FavoriteStation;

    /// Adding a station that is already a favorite keeps the original entry.
    fn add(&mut self, record: FavoriteStation) {
        if !self.is_favorite(&record.station.station_id) {
            self.entries.push(record);
        }
    }

    fn remove(&mut self, id: &str) {
        self.entries.retain(|f| f.station.station_id != id);
    }

    fn list(&self) -> &[FavoriteStation] {
        &self.entries
    }
}
