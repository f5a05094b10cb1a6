//! Voice search: turning speech into a search query.

use crate::{
    destinations::Language,
    permission::{Capability, PermissionGate},
};
use log::{debug, warn};
use std::fmt;
use strum_macros::EnumIter;

/// Why a recognition session failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Hash)]
pub enum RecognitionError {
    /// The network took too long to answer.
    NetworkTimeout,
    /// Some other network failure.
    Network,
    /// The microphone could not be recorded.
    Audio,
    /// The recognition server reported an error.
    Server,
    /// Error on the calling side.
    Client,
    /// Nothing was said.
    SpeechTimeout,
    /// Speech was heard but nothing matched.
    NoMatch,
    /// The recognizer is serving someone else.
    RecognizerBusy,
    /// The recognizer lacks the record-audio capability.
    InsufficientPermissions,
    /// Anything else.
    Unknown,
}

impl RecognitionError {
    /// Map a platform error code to the error.
    pub fn from_code(code: i32) -> Self {
        use RecognitionError::*;

        match code {
            1 => NetworkTimeout,
            2 => Network,
            3 => Audio,
            4 => Server,
            5 => Client,
            6 => SpeechTimeout,
            7 => NoMatch,
            8 => RecognizerBusy,
            9 => InsufficientPermissions,
            _ => Unknown,
        }
    }

    /// The text shown to the user.
    pub fn description(self) -> &'static str {
        use RecognitionError::*;

        match self {
            Audio => "Audio recording error",
            Client => "Client side error",
            InsufficientPermissions => "Insufficient permissions",
            Network => "Network error",
            NetworkTimeout => "Network timeout",
            NoMatch => "No match found",
            RecognizerBusy => "RecognitionService busy",
            Server => "Server error",
            SpeechTimeout => "Speech input timeout",
            Unknown => "Unknown error",
        }
    }
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for RecognitionError {}

/// Something that can listen to the user and produce text.
pub trait VoiceSearchProvider {
    /// Whether any recognizer is installed. Probed before every session.
    fn is_available(&self) -> bool;

    /// Run one recognition session. Candidates come best first.
    fn listen(&mut self, language: Language) -> Result<Vec<String>, RecognitionError>;
}

/// How a voice search attempt ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum VoiceOutcome {
    /// The best candidate, to be used as the search query.
    Query(String),
    /// The session ended without candidates.
    NoResult,
    /// The user refused the record-audio capability.
    PermissionDenied,
    /// No recognizer is installed.
    Unavailable,
    /// The recognizer reported an error.
    Failed(RecognitionError),
}

impl VoiceOutcome {
    /// Non-fatal message to show the user, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            VoiceOutcome::Query(_) | VoiceOutcome::NoResult => None,
            VoiceOutcome::PermissionDenied => Some("Permission not granted".to_owned()),
            VoiceOutcome::Unavailable => Some("Speech recognition not available".to_owned()),
            VoiceOutcome::Failed(err) => Some(format!("Error: {}", err.description())),
        }
    }
}

/// Ask the user for a spoken query.
///
/// Requests the record-audio capability if needed, probes for a recognizer, then runs one
/// session. The user can simply try again after any failure.
pub fn ask_speech_input(
    gate: &mut dyn PermissionGate,
    provider: &mut dyn VoiceSearchProvider,
    language: Language,
) -> VoiceOutcome {
    if !gate.status(Capability::RecordAudio).is_granted()
        && !gate.request(Capability::RecordAudio).is_granted()
    {
        warn!("Voice search without the record-audio capability");
        return VoiceOutcome::PermissionDenied;
    }

    if !provider.is_available() {
        warn!("Speech recognition not available");
        return VoiceOutcome::Unavailable;
    }

    debug!("Started listening ({})", language.as_static_str());
    match provider.listen(language) {
        Ok(candidates) => {
            debug!("Results received: {} candidate(s)", candidates.len());
            candidates
                .into_iter()
                .next()
                .map(VoiceOutcome::Query)
                .unwrap_or(VoiceOutcome::NoResult)
        }
        Err(err) => {
            warn!("Speech recognition error: {}", err);
            VoiceOutcome::Failed(err)
        }
    }
}

/// A recognizer with a canned answer, used by the command line tools and in tests.
#[derive(Clone, Debug)]
pub struct CannedRecognizer {
    available: bool,
    answer: Result<Vec<String>, RecognitionError>,
    sessions: usize,
}

impl CannedRecognizer {
    /// A recognizer that always hears `candidates`.
    pub fn hearing<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CannedRecognizer {
            available: true,
            answer: Ok(candidates.into_iter().map(Into::into).collect()),
            sessions: 0,
        }
    }

    /// A recognizer that always fails with `err`.
    pub fn failing(err: RecognitionError) -> Self {
        CannedRecognizer {
            available: true,
            answer: Err(err),
            sessions: 0,
        }
    }

    /// No recognizer installed at all.
    pub fn missing() -> Self {
        CannedRecognizer {
            available: false,
            answer: Ok(vec![]),
            sessions: 0,
        }
    }

    /// Number of sessions started.
    pub fn sessions(&self) -> usize {
        self.sessions
    }
}

impl VoiceSearchProvider for CannedRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn listen(&mut self, _language: Language) -> Result<Vec<String>, RecognitionError> {
        self.sessions += 1;
        self.answer.clone()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
