//! The destination search screen as a snapshot and an update function.

use crate::{
    destinations::{self, DestinationEntry, Language},
    voice::VoiceOutcome,
};
use log::debug;

/// Inputs to the destination screen.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    /// The user typed in the search box.
    QueryChanged(String),
    /// The user picked a language in the language dialog.
    LanguageSelected(Language),
    /// A voice search attempt finished.
    Voice(VoiceOutcome),
}

/// Snapshot of the destination screen.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    language: Language,
    query: String,
    displayed: Vec<DestinationEntry>,
    notice: Option<String>,
}

impl HomeState {
    /// Fresh screen in `language` with an empty query.
    pub fn new(language: Language) -> Self {
        HomeState {
            language,
            query: String::new(),
            displayed: destinations::catalog(language),
            notice: None,
        }
    }

    /// Current language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The entries currently listed.
    pub fn displayed(&self) -> &[DestinationEntry] {
        &self.displayed
    }

    /// Heading in the current language.
    pub fn title(&self) -> &'static str {
        destinations::title(self.language)
    }

    /// Search box placeholder in the current language.
    pub fn search_hint(&self) -> &'static str {
        destinations::search_hint(self.language)
    }

    /// Transient message raised by the last update.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl Default for HomeState {
    fn default() -> Self {
        HomeState::new(Language::default())
    }
}

/// Advance the screen by one event. The list is always the current language's catalog
/// filtered by the current query.
pub fn update(state: HomeState, event: HomeEvent) -> HomeState {
    let HomeState {
        mut language,
        mut query,
        ..
    } = state;
    let mut notice = None;

    match event {
        HomeEvent::QueryChanged(text) => query = text,
        HomeEvent::LanguageSelected(selected) => language = selected,
        HomeEvent::Voice(VoiceOutcome::Query(text)) => query = text,
        HomeEvent::Voice(outcome) => notice = outcome.notice(),
    }

    let catalog = destinations::catalog(language);
    let displayed = destinations::filter(&catalog, &query);
    debug!(
        "{} of {} destinations match {:?} ({})",
        displayed.len(),
        catalog.len(),
        query,
        language.as_static_str()
    );

    HomeState {
        language,
        query,
        displayed,
        notice,
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::voice::RecognitionError;
    use strum::IntoEnumIterator;

    fn labels(state: &HomeState) -> Vec<&'static str> {
        state.displayed().iter().map(|entry| entry.label).collect()
    }

    #[test]
    fn test_fresh_screen() {
        let state = HomeState::default();

        assert_eq!(state.language(), Language::English);
        assert_eq!(state.query(), "");
        assert_eq!(state.displayed().len(), 10);
        assert_eq!(state.title(), "Welcome to IITM RP");
        assert_eq!(state.search_hint(), "Enter Destination");
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_empty_query_lists_whole_catalog_in_every_language() {
        for language in Language::iter() {
            let state = update(HomeState::default(), HomeEvent::LanguageSelected(language));

            assert_eq!(state.displayed(), &destinations::catalog(language)[..]);
        }
    }

    #[test]
    fn test_typing_filters() {
        let state = update(HomeState::default(), HomeEvent::QueryChanged("lab".to_owned()));
        assert_eq!(labels(&state), vec!["Prof's Lab"]);

        let state = update(state, HomeEvent::QueryChanged(String::new()));
        assert_eq!(state.displayed().len(), 10);
    }

    #[test]
    fn test_language_switch_translates_everything() {
        let state = update(
            HomeState::default(),
            HomeEvent::LanguageSelected(Language::Hindi),
        );

        assert_eq!(state.title(), "IITM RP में आपका स्वागत है");
        assert_eq!(state.search_hint(), "गंतव्य दर्ज करें");
        assert_eq!(state.displayed()[0].label, "पुस्तकालय");
        assert_eq!(state.displayed()[0].key, "Library");
    }

    #[test]
    fn test_query_survives_language_switch() {
        let state = update(HomeState::default(), HomeEvent::QueryChanged("303".to_owned()));
        let state = update(state, HomeEvent::LanguageSelected(Language::Tamil));

        assert_eq!(state.query(), "303");
        assert_eq!(labels(&state), vec!["ஈ303"]);
    }

    #[test]
    fn test_voice_result_becomes_query() {
        let state = update(
            HomeState::default(),
            HomeEvent::Voice(VoiceOutcome::Query("canteen".to_owned())),
        );

        assert_eq!(state.query(), "canteen");
        assert_eq!(labels(&state), vec!["Canteen"]);
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn test_voice_failure_keeps_query_and_notifies() {
        let state = update(HomeState::default(), HomeEvent::QueryChanged("gate".to_owned()));
        let state = update(
            state,
            HomeEvent::Voice(VoiceOutcome::Failed(RecognitionError::NoMatch)),
        );

        assert_eq!(state.query(), "gate");
        assert_eq!(labels(&state), vec!["Main Gate", "Back Gate"]);
        assert_eq!(state.notice(), Some("Error: No match found"));

        // One shot.
        let state = update(state, HomeEvent::QueryChanged("gate".to_owned()));
        assert_eq!(state.notice(), None);
    }
}
