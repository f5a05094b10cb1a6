use crate::{
    coords::GeoPoint,
    errors::GeofenceErr,
    geofence::{self, GeofenceResult},
};

mod radius;

pub use radius::Radius;

/// The campus reference point and the radius of the geofence around it.
pub const IITM_RP: TargetSite = TargetSite {
    id: "iitm-rp",
    name: "IITM RP",
    location: GeoPoint::new_unchecked(21.7159202, 73.0264064),
    radius: Radius::new(200.0),
};

/// Description of a site guarded by a geofence.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSite {
    pub id: &'static str,
    pub name: &'static str,
    pub location: GeoPoint,
    pub radius: Radius,
}

impl TargetSite {
    /// Classify a location sample against this site.
    pub fn evaluate(&self, sample: GeoPoint) -> Result<GeofenceResult, GeofenceErr> {
        geofence::evaluate(sample, self.location, self.radius)
    }

    /// Copy of this site at a different location and radius.
    ///
    /// Keeps the id and display name, so status messages still name the campus.
    pub fn relocated(&self, location: GeoPoint, radius: Radius) -> Result<Self, GeofenceErr> {
        if !radius.is_valid() {
            return Err(GeofenceErr::InvalidRadius(radius.meters()));
        }

        Ok(TargetSite {
            location,
            radius,
            ..*self
        })
    }
}

impl Default for TargetSite {
    fn default() -> Self {
        IITM_RP
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_campus_constant() {
        assert_eq!(IITM_RP.location.lat, 21.7159202);
        assert_eq!(IITM_RP.location.lon, 73.0264064);
        assert_eq!(IITM_RP.radius.meters(), 200.0);
        assert!(GeoPoint::new(IITM_RP.location.lat, IITM_RP.location.lon).is_ok());
    }

    #[test]
    fn test_site_evaluate_at_campus() {
        let result = IITM_RP.evaluate(IITM_RP.location).unwrap();
        assert!(result.is_inside());
    }

    #[test]
    fn test_relocated() {
        let elsewhere = GeoPoint::new(46.9163, -114.0906).unwrap();
        let site = IITM_RP.relocated(elsewhere, Radius::new(50.0)).unwrap();

        assert_eq!(site.name, IITM_RP.name);
        assert_eq!(site.location, elsewhere);
        assert!(IITM_RP.relocated(elsewhere, Radius::new(0.0)).is_err());
    }
}
