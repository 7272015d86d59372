use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair with an optional third component.
///
/// `z` is 0 for 2D coordinates. Equality is exact, component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLngZ {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub z: f64,
}

impl LatLngZ {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, z: 0.0 }
    }

    pub fn with_z(lat: f64, lng: f64, z: f64) -> Self {
        Self { lat, lng, z }
    }
}

impl std::fmt::Display for LatLngZ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LatLngZ [lat={}, lng={}, z={}]", self.lat, self.lng, self.z)
    }
}

/// Trait for types that can provide latitude, longitude and an optional third value.
///
/// Implemented for [`LatLngZ`], `(lat, lng)` and `(lat, lng, z)` tuples, and
/// `geo_types::Coord<f64>` / `geo_types::Point<f64>` (where x is longitude and y is latitude).
/// This allows the encoder to accept any of them.
pub trait Coordinate {
    /// Returns the latitude.
    fn lat(&self) -> f64;
    /// Returns the longitude.
    fn lng(&self) -> f64;
    /// Returns the third dimension value, 0 when the type has none.
    fn z(&self) -> f64 {
        0.0
    }
}

impl Coordinate for LatLngZ {
    fn lat(&self) -> f64 {
        self.lat
    }
    fn lng(&self) -> f64 {
        self.lng
    }
    fn z(&self) -> f64 {
        self.z
    }
}

impl Coordinate for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lng(&self) -> f64 {
        self.1
    }
}

impl Coordinate for (f64, f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lng(&self) -> f64 {
        self.1
    }
    fn z(&self) -> f64 {
        self.2
    }
}

impl Coordinate for Coord<f64> {
    fn lat(&self) -> f64 {
        self.y
    }
    fn lng(&self) -> f64 {
        self.x
    }
}

impl Coordinate for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }
    fn lng(&self) -> f64 {
        self.x()
    }
}

impl<C: Coordinate> From<&C> for LatLngZ {
    fn from(coord: &C) -> Self {
        LatLngZ::with_z(coord.lat(), coord.lng(), coord.z())
    }
}

impl From<LatLngZ> for Coord<f64> {
    fn from(coord: LatLngZ) -> Self {
        Coord {
            x: coord.lng,
            y: coord.lat,
        }
    }
}
