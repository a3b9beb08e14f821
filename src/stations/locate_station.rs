use crate::types::station::{LatLon, Station};
use log::debug;
use ordered_float::OrderedFloat;

/// Station used when no coordinate is available.
pub const DEFAULT_FALLBACK_STATION: &str = "GKY";

/// The result of a nearest-station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestMatch {
    pub station: Station,
    /// The coordinate that was searched from, `None` when the fallback was used.
    pub coordinate: Option<LatLon>,
    /// Great-circle distance from `coordinate` to the station, for display only.
    pub distance_km: Option<f64>,
}

impl NearestMatch {
    pub fn is_fallback(&self) -> bool {
        self.coordinate.is_none()
    }
}

/// Picks a station for a coordinate by linear scan over a station set.
///
/// Selection uses the planar distance in degrees ([`LatLon::planar_distance`]);
/// among equally distant stations the one earliest in the slice wins.
#[derive(Debug, Clone, Copy)]
pub struct NearestStationLocator<'a> {
    stations: &'a [Station],
    fallback_id: &'a str,
}

impl<'a> NearestStationLocator<'a> {
    pub fn new(stations: &'a [Station]) -> Self {
        Self {
            stations,
            fallback_id: DEFAULT_FALLBACK_STATION,
        }
    }

    pub fn with_fallback(mut self, fallback_id: &'a str) -> Self {
        self.fallback_id = fallback_id;
        self
    }

    /// The nearest station to `coordinate`, or the fallback station when there
    /// is no coordinate.
    ///
    /// Returns `None` when the set is empty, or when there is no coordinate and
    /// the fallback id is not in the set.
    pub fn locate(&self, coordinate: Option<LatLon>) -> Option<NearestMatch> {
        match coordinate {
            Some(query) => self.nearest(query).map(|station| NearestMatch {
                distance_km: Some(query.great_circle_km(&station.coordinate())),
                station: station.clone(),
                coordinate: Some(query),
            }),
            None => self.fallback().map(|station| NearestMatch {
                station: station.clone(),
                coordinate: None,
                distance_km: None,
            }),
        }
    }

    /// `None` for an empty set or a non-finite coordinate.
    pub fn nearest(&self, query: LatLon) -> Option<&'a Station> {
        if !query.0.is_finite() || !query.1.is_finite() {
            debug!("Ignoring non-finite coordinate ({}, {})", query.0, query.1);
            return None;
        }
        // `min_by_key` keeps the first of several equal minima.
        let nearest = self
            .stations
            .iter()
            .min_by_key(|s| OrderedFloat(s.coordinate().planar_distance(&query)));
        if let Some(station) = nearest {
            debug!(
                "Nearest station to ({}, {}) is {}",
                query.0, query.1, station.station_id
            );
        }
        nearest
    }

    pub fn fallback(&self) -> Option<&'a Station> {
        let found = self
            .stations
            .iter()
            .find(|s| s.station_id == self.fallback_id);
        if found.is_none() {
            debug!("Fallback station {} not in directory", self.fallback_id);
        }
        found
    }
}
