use std::str::FromStr;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Languages the destination list and headings are translated into.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum Language {
    #[strum(to_string = "English", serialize = "english", serialize = "en")]
    English,
    #[strum(to_string = "Hindi", serialize = "hindi", serialize = "hi")]
    Hindi,
    #[strum(to_string = "Tamil", serialize = "tamil", serialize = "ta")]
    Tamil,
    #[strum(to_string = "Telugu", serialize = "telugu", serialize = "te")]
    Telugu,
}

impl Language {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// Parse a language name or tag, falling back to English when it is unknown.
    pub fn from_tag_or_default(tag: &str) -> Self {
        Language::from_str(tag.trim()).unwrap_or_default()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_to_string_for_language() {
        assert_eq!(Language::Tamil.as_static_str(), "Tamil");
    }

    #[test]
    fn test_from_string_for_language() {
        assert_eq!(Language::from_str("Hindi").unwrap(), Language::Hindi);
        assert_eq!(Language::from_str("te").unwrap(), Language::Telugu);
        assert!(Language::from_str("Klingon").is_err());
    }

    #[test]
    fn round_trip_strings_for_language() {
        for language in Language::iter() {
            assert_eq!(
                Language::from_str(language.as_static_str()).unwrap(),
                language
            );
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_english() {
        assert_eq!(Language::from_tag_or_default("Klingon"), Language::English);
        assert_eq!(Language::from_tag_or_default(" tamil "), Language::Tamil);
    }
}
