//! Module for errors.
use std::{error::Error, fmt::Display};

/// Error from the geofence and destination interfaces.
#[derive(Debug)]
pub enum GeofenceErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Error parsing a recorded location sample.
    SampleFormat(::serde_json::Error),
    /// General error with any cause information erased and replaced by a string
    GeneralError(String),

    // My own errors from this crate
    /// Latitude outside of [-90, 90] or not a number.
    InvalidLatitude(f64),
    /// Longitude outside of [-180, 180] or not a number.
    InvalidLongitude(f64),
    /// A geofence radius must be a positive, finite number of meters.
    InvalidRadius(f64),
    /// Unknown language name or tag.
    InvalidLanguage(String),
    /// Location request intervals that cannot be honored.
    InvalidRequest(&'static str),
    /// Not enough data to complete the task.
    NotEnoughData,
}

impl Display for GeofenceErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::GeofenceErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            SampleFormat(err) => write!(f, "malformed location sample: {}", err),
            GeneralError(msg) => write!(f, "general error forwarded: {}", msg),

            InvalidLatitude(lat) => write!(f, "invalid latitude: {}", lat),
            InvalidLongitude(lon) => write!(f, "invalid longitude: {}", lon),
            InvalidRadius(radius) => write!(f, "invalid geofence radius: {}", radius),
            InvalidLanguage(lang) => write!(f, "invalid language: {}", lang),
            InvalidRequest(msg) => write!(f, "invalid location request: {}", msg),
            NotEnoughData => write!(f, "not enough data to complete task"),
        }
    }
}

impl Error for GeofenceErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeofenceErr::IO(err) => Some(err),
            GeofenceErr::SampleFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for GeofenceErr {
    fn from(err: ::std::io::Error) -> GeofenceErr {
        GeofenceErr::IO(err)
    }
}

impl From<::serde_json::Error> for GeofenceErr {
    fn from(err: ::serde_json::Error) -> GeofenceErr {
        GeofenceErr::SampleFormat(err)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_display_names_the_bad_value() {
        assert_eq!(
            GeofenceErr::InvalidLatitude(91.5).to_string(),
            "invalid latitude: 91.5"
        );
        assert_eq!(
            GeofenceErr::InvalidRadius(-1.0).to_string(),
            "invalid geofence radius: -1"
        );
    }

    #[test]
    fn test_io_error_is_the_source() {
        let err: GeofenceErr = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(GeofenceErr::NotEnoughData.source().is_none());
    }

    #[test]
    fn test_invalid_language_names_the_input() {
        let err = GeofenceErr::InvalidLanguage("Klingon".to_owned());

        assert_eq!(err.to_string(), "invalid language: Klingon");
        assert!(err.source().is_none());
    }
}
