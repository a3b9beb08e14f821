//! Wind vector decoding: orthogonal components to scalar speed and an 8-point
//! compass direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight principal compass points.
///
/// The compass is indexed from `N` at an angle of 0° and advances in 45° steps
/// in the direction of increasing `atan2(y, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

const COMPASS: [CompassDirection; 8] = [
    CompassDirection::N,
    CompassDirection::NE,
    CompassDirection::E,
    CompassDirection::SE,
    CompassDirection::S,
    CompassDirection::SW,
    CompassDirection::W,
    CompassDirection::NW,
];

// Sixteen-point names accepted from legacy records, in 22.5° steps from N.
const COMPASS_16: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
    "NW", "NNW",
];

impl CompassDirection {
    /// Maps an angle in degrees to a compass point.
    ///
    /// The angle is shifted into `[0, 360)`, divided by 45, rounded half away from
    /// zero and taken modulo 8, so exactly 22.5° lands on [`CompassDirection::NE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stationwx::CompassDirection;
    ///
    /// assert_eq!(CompassDirection::from_degrees(0.0), CompassDirection::N);
    /// assert_eq!(CompassDirection::from_degrees(22.5), CompassDirection::NE);
    /// assert_eq!(CompassDirection::from_degrees(-90.0), CompassDirection::W);
    /// ```
    pub fn from_degrees(angle: f64) -> Self {
        let shifted = (angle + 360.0) % 360.0;
        let index = (shifted / 45.0).round() as usize % 8;
        COMPASS[index]
    }

    /// The angle (in degrees) this compass point is centered on.
    pub fn degrees(&self) -> f64 {
        *self as u8 as f64 * 45.0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a compass name is not one of the 8 or 16 standard points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown compass direction '{0}'")]
pub struct UnknownCompassDirection(pub String);

impl FromStr for CompassDirection {
    type Err = UnknownCompassDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        COMPASS
            .iter()
            .find(|dir| dir.as_str() == wanted)
            .copied()
            .ok_or_else(|| UnknownCompassDirection(s.to_string()))
    }
}

/// A wind observation expressed as two orthogonal components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub x: f64,
    pub y: f64,
}

impl WindVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector from a scalar speed and a compass name, using the same
    /// angular convention that [`WindVector::direction`] decodes.
    ///
    /// Both 8-point (`"NE"`) and 16-point (`"NNE"`) names are accepted.
    pub fn from_speed_and_compass(
        speed: f64,
        compass: &str,
    ) -> Result<Self, UnknownCompassDirection> {
        let wanted = compass.trim().to_ascii_uppercase();
        let index = COMPASS_16
            .iter()
            .position(|name| *name == wanted)
            .ok_or_else(|| UnknownCompassDirection(compass.to_string()))?;
        let radians = (index as f64 * 22.5).to_radians();
        Ok(Self::new(speed * radians.cos(), speed * radians.sin()))
    }

    /// Euclidean norm of the two components.
    pub fn speed(&self) -> f64 {
        speed(self.x, self.y)
    }

    pub fn direction(&self) -> CompassDirection {
        direction(self.x, self.y)
    }
}

/// Scalar wind speed from its components.
///
/// # Examples
///
/// ```
/// assert_eq!(stationwx::wind::speed(3.0, 4.0), 5.0);
/// ```
pub fn speed(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

/// Compass direction of the vector `(x, y)`, from `atan2(y, x)` in degrees.
pub fn direction(x: f64, y: f64) -> CompassDirection {
    CompassDirection::from_degrees(y.atan2(x).to_degrees())
}
