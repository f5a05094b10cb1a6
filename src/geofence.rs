//! The geofence decision.

use crate::{coords::GeoPoint, errors::GeofenceErr, site::Radius, site::TargetSite};

/// Which side of the fence a sample fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Within the radius, boundary included.
    Inside,
    /// Farther than the radius.
    Outside,
}

/// The classification of a single location sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceResult {
    /// Inside or outside.
    pub verdict: Verdict,
    /// The sample that was classified.
    pub sample: GeoPoint,
    /// Great-circle distance from the sample to the target in meters.
    pub distance_m: f64,
}

impl GeofenceResult {
    /// Return true if the sample was inside the fence.
    pub fn is_inside(&self) -> bool {
        self.verdict == Verdict::Inside
    }

    /// The message shown to the user for this classification.
    pub fn status_message(&self, site: &TargetSite) -> String {
        match self.verdict {
            Verdict::Inside => format!("You are at {}", site.name),
            Verdict::Outside => "The location is not supported".to_owned(),
        }
    }
}

/// Classify `sample` against a fence of `radius` around `target`.
pub fn evaluate(
    sample: GeoPoint,
    target: GeoPoint,
    radius: Radius,
) -> Result<GeofenceResult, GeofenceErr> {
    if !radius.is_valid() {
        return Err(GeofenceErr::InvalidRadius(radius.meters()));
    }

    let distance_m = sample.distance_to(target);
    let verdict = if distance_m <= radius.meters() {
        Verdict::Inside
    } else {
        Verdict::Outside
    };

    Ok(GeofenceResult {
        verdict,
        sample,
        distance_m,
    })
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
