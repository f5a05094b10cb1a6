//! Runtime capabilities that gate the location sampler and voice search.

use std::collections::HashMap;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// A capability the user grants at runtime.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Capability {
    /// Precise device location.
    #[strum(to_string = "ACCESS_FINE_LOCATION", serialize = "location")]
    FineLocation,
    /// Microphone access for voice search.
    #[strum(to_string = "RECORD_AUDIO", serialize = "audio")]
    RecordAudio,
}

impl Capability {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// Whether a capability is currently granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    #[allow(missing_docs)]
    Granted,
    #[allow(missing_docs)]
    Denied,
}

impl PermissionStatus {
    /// Return true if the capability was granted.
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}

/// Source of capability grants.
pub trait PermissionGate {
    /// The current status without asking the user.
    fn status(&self, capability: Capability) -> PermissionStatus;

    /// Ask the user for the capability and report the answer.
    fn request(&mut self, capability: Capability) -> PermissionStatus;
}

/// A fixed table of answers, used by the command line tools and in tests.
///
/// Capabilities missing from the table are denied. A request for a capability that is not yet
/// granted is answered from `answers`, and a granted answer sticks.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: HashMap<Capability, bool>,
    answers: HashMap<Capability, bool>,
    requests: usize,
}

impl StaticPermissions {
    /// Create a table where nothing is granted and every request is refused.
    pub fn new() -> Self {
        StaticPermissions::default()
    }

    /// Mark a capability as already granted (or explicitly not).
    pub fn with_status(mut self, capability: Capability, status: PermissionStatus) -> Self {
        self.granted.insert(capability, status.is_granted());
        self
    }

    /// Set how the user answers a request for this capability.
    pub fn answering(mut self, capability: Capability, status: PermissionStatus) -> Self {
        self.answers.insert(capability, status.is_granted());
        self
    }

    /// Number of times the user was asked.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl PermissionGate for StaticPermissions {
    fn status(&self, capability: Capability) -> PermissionStatus {
        PermissionStatus::from(self.granted.get(&capability).copied().unwrap_or(false))
    }

    fn request(&mut self, capability: Capability) -> PermissionStatus {
        if self.status(capability).is_granted() {
            return PermissionStatus::Granted;
        }

        self.requests += 1;
        let answer = self.answers.get(&capability).copied().unwrap_or(false);
        self.granted.insert(capability, answer);

        PermissionStatus::from(answer)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
