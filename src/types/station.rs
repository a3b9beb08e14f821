//! Defines the weather station record served by the `/stations` endpoint and the
//! coordinate type used to locate stations.

use serde::{Deserialize, Serialize};

/// Represents a single observation site and its metadata.
///
/// All fields are required on the wire. Stations are immutable once loaded into a
/// [`crate::StationDirectory`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The unique station identifier (e.g., "GKY").
    pub station_id: String,
    /// Human readable name, sometimes with a parenthesized qualifier
    /// (e.g., "Arlington (Municipal Airport)").
    pub station_name: String,
    /// The observation network the station reports to (e.g., "TX_ASOS").
    pub station_network: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
    /// Elevation above sea level in meters.
    pub elevation: f64,
    /// The IANA timezone name for the station's location (e.g., "America/Chicago").
    pub timezone: String,
}

impl Station {
    /// The station's position as a [`LatLon`].
    pub fn coordinate(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use stationwx::LatLon;
///
/// let arlington = LatLon(32.66, -97.09);
/// assert_eq!(arlington.0, 32.66); // Latitude
/// assert_eq!(arlington.1, -97.09); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Planar distance in degrees, treating latitude and longitude as Cartesian axes.
    ///
    /// This is only meaningful for ranking nearby stations against each other;
    /// use [`LatLon::great_circle_km`] for a distance a person would read.
    pub fn planar_distance(&self, other: &LatLon) -> f64 {
        (self.0 - other.0).hypot(self.1 - other.1)
    }

    /// Great-circle distance in kilometers.
    pub fn great_circle_km(&self, other: &LatLon) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.0,
                longitude: self.1,
            },
            haversine::Location {
                latitude: other.0,
                longitude: other.1,
            },
            haversine::Units::Kilometers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_deserializes_from_wire_record() {
        let json = r#"{
            "station_id": "GKY",
            "station_name": "Arlington (Municipal Airport)",
            "station_network": "TX_ASOS",
            "latitude": 32.66,
            "longitude": -97.09,
            "elevation": 191.0,
            "timezone": "America/Chicago"
        }"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.station_id, "GKY");
        assert_eq!(station.coordinate(), LatLon(32.66, -97.09));
    }

    #[test]
    fn test_station_missing_field_is_rejected() {
        let json = r#"{"station_id": "GKY", "station_name": "Arlington"}"#;
        assert!(serde_json::from_str::<Station>(json).is_err());
    }

    #[test]
    fn test_planar_distance_is_euclidean_in_degrees() {
        let a = LatLon(0.0, 0.0);
        let b = LatLon(3.0, 4.0);
        assert_eq!(a.planar_distance(&b), 5.0);
    }

    #[test]
    fn test_great_circle_one_degree_latitude() {
        let d = LatLon(0.0, 0.0).great_circle_km(&LatLon(1.0, 0.0));
        assert!((d - 111.0).abs() < 1.0, "got {d}");
    }
}
