//! Latitude and longitude coordinates and the great-circle distance between them.

use crate::errors::GeofenceErr;
use std::fmt::Display;

/// Mean radius of the Earth in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A latitude and longitude in decimal degrees, WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Degrees north of the equator.
    pub lat: f64,
    /// Degrees east of the prime meridian.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point, rejecting coordinates that are out of range or not finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeofenceErr> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeofenceErr::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GeofenceErr::InvalidLongitude(lon));
        }

        Ok(GeoPoint { lat, lon })
    }

    /// Create a point without checking the ranges. Meant for constants.
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Great-circle distance to `other` in meters, by the haversine formula.
    pub fn distance_to(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = ((d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl std::convert::TryFrom<(f64, f64)> for GeoPoint {
    type Error = GeofenceErr;

    fn try_from(pair: (f64, f64)) -> Result<Self, Self::Error> {
        GeoPoint::new(pair.0, pair.1)
    }
}

impl Display for GeoPoint {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "({:.7}, {:.7})", self.lat, self.lon)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
