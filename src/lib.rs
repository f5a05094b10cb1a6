#![deny(missing_docs)]
//! Package to gate a campus guide behind a geofence and search the campus destinations.

//
// Public API
//
pub use cmd_line::CommonCmdLineArgs;
pub use coords::GeoPoint;
pub use destinations::{catalog, catalog_for_tag, filter, DestinationEntry, Language};
pub use errors::GeofenceErr;
pub use geofence::{evaluate, GeofenceResult, Verdict};
pub use home::{HomeEvent, HomeState};
pub use location::{
    read_samples, subscribe, LocationCallback, LocationRequest, LocationResult, LocationSample,
    LocationSampler, Priority, ReplaySampler, Subscription, SubscriptionId,
};
pub use permission::{Capability, PermissionGate, PermissionStatus, StaticPermissions};
pub use site::{Radius, TargetSite, IITM_RP};
pub use splash::{Exit, Phase, SplashEffect, SplashEvent, SplashState};
pub use voice::{
    ask_speech_input, CannedRecognizer, RecognitionError, VoiceOutcome, VoiceSearchProvider,
};

pub mod destinations;
pub mod home;
pub mod location;
pub mod splash;

//
// Implementation only
//
mod cmd_line;
mod coords;
mod errors;
mod geofence;
mod permission;
mod site;
mod voice;
