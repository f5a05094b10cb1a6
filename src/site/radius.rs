use std::fmt::Display;

/// New type wrapper for a geofence radius in meters.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Radius {
    meters: f64,
}

impl From<f64> for Radius {
    fn from(val: f64) -> Self {
        Radius { meters: val }
    }
}

impl Into<f64> for Radius {
    fn into(self) -> f64 {
        self.meters
    }
}

impl Display for Radius {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{} m", self.meters)
    }
}

impl Radius {
    /// Test to see if this is a usable radius.
    pub fn is_valid(self) -> bool {
        self.meters.is_finite() && self.meters > 0.0
    }

    /// Create a new one.
    pub const fn new(meters: f64) -> Self {
        Radius { meters }
    }

    /// Get the radius in meters.
    pub fn meters(self) -> f64 {
        self.meters
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
