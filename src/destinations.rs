//! The campus destinations, their translations, and the search filter over them.

mod language;

pub use language::Language;

/// Canonical (English) names of the campus destinations, in display order.
const ENGLISH: [&str; 10] = [
    "Library",
    "E303",
    "D-block",
    "E-block",
    "A-block",
    "Prof's Lab",
    "Incubation Cell",
    "Main Gate",
    "Back Gate",
    "Canteen",
];

const HINDI: [&str; 10] = [
    "पुस्तकालय",
    "ई303",
    "डी-ब्लॉक",
    "ई-ब्लॉक",
    "ए-ब्लॉक",
    "प्रोफेसर लैब",
    "इनक्यूबेशन सेल",
    "मुख्य द्वार",
    "पीछे का गेट",
    "कैंटीन",
];

const TAMIL: [&str; 10] = [
    "நூலகம்",
    "ஈ303",
    "டி-ப்ளாக்",
    "ஈ-ப்ளாக்",
    "ஏ-ப்ளாக்",
    "பேராசிரியர் ஆய்வகம்",
    "செய்லிடல் செல்",
    "முதன்மை வாயில்",
    "பின்புற வாயில்",
    "கேன்டீன்",
];

const TELUGU: [&str; 10] = [
    "గ్రంథాలయం",
    "E303",
    "D-బ్లాక్",
    "E-బ్లాక్",
    "A-బ్లాక్",
    "ప్రొఫెసర్ ల్యాబ్",
    "ఇంక్యూబేషన్ సెల్",
    "ప్రధాన గేట్",
    "బ్యాక్ గేట్",
    "కాంటీన్",
];

/// A named campus location as shown in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DestinationEntry {
    /// The English name, identical across translations.
    pub key: &'static str,
    /// Display text in `language`.
    pub label: &'static str,
    /// The language of `label`.
    pub language: Language,
}

impl DestinationEntry {
    /// Create an entry that is its own label, in English.
    pub const fn english(name: &'static str) -> Self {
        DestinationEntry {
            key: name,
            label: name,
            language: Language::English,
        }
    }
}

fn labels(language: Language) -> &'static [&'static str; 10] {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Tamil => &TAMIL,
        Language::Telugu => &TELUGU,
    }
}

/// The full destination list in a language.
pub fn catalog(language: Language) -> Vec<DestinationEntry> {
    ENGLISH
        .iter()
        .zip(labels(language).iter())
        .map(|(&key, &label)| DestinationEntry {
            key,
            label,
            language,
        })
        .collect()
}

/// The destination list for a language name or tag. Unknown tags get the English list.
pub fn catalog_for_tag(tag: &str) -> Vec<DestinationEntry> {
    catalog(Language::from_tag_or_default(tag))
}

/// Heading of the destination screen.
pub fn title(language: Language) -> &'static str {
    match language {
        Language::English => "Welcome to IITM RP",
        Language::Hindi => "IITM RP में आपका स्वागत है",
        Language::Tamil => "IITM RP க்கு வரவேற்கின்றோம்",
        Language::Telugu => "IITM RP కు స్వాగతం",
    }
}

/// Placeholder text of the search box.
pub fn search_hint(language: Language) -> &'static str {
    match language {
        Language::English => "Enter Destination",
        Language::Hindi => "गंतव्य दर्ज करें",
        Language::Tamil => "இலக்கு உள்ளிடுக",
        Language::Telugu => "గమ్యస్థానాన్ని నమోదు చేయండి",
    }
}

/// Keep the entries whose label contains `query`, ignoring case. Order is preserved and an
/// empty query keeps everything.
pub fn filter(entries: &[DestinationEntry], query: &str) -> Vec<DestinationEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.label.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use strum::IntoEnumIterator;

    fn labels_of(entries: &[DestinationEntry]) -> Vec<&'static str> {
        entries.iter().map(|entry| entry.label).collect()
    }

    #[test]
    fn test_catalogs_line_up() {
        for language in Language::iter() {
            let entries = catalog(language);
            assert_eq!(entries.len(), 10);

            for (entry, key) in entries.iter().zip(ENGLISH.iter()) {
                assert_eq!(entry.key, *key);
                assert_eq!(entry.language, language);
            }
        }

        assert_eq!(catalog(Language::Hindi)[0].label, "पुस्तकालय");
        assert_eq!(catalog(Language::Telugu)[9].label, "కాంటీన్");
    }

    #[test]
    fn test_unknown_tag_gets_english() {
        assert_eq!(catalog_for_tag("Marathi"), catalog(Language::English));
        assert_eq!(catalog_for_tag("Tamil"), catalog(Language::Tamil));
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let entries = catalog(Language::English);
        assert_eq!(filter(&entries, ""), entries);
    }

    #[test]
    fn test_filter_block() {
        let entries = [
            DestinationEntry::english("Library"),
            DestinationEntry::english("E303"),
            DestinationEntry::english("D-block"),
        ];

        assert_eq!(labels_of(&filter(&entries, "block")), vec!["D-block"]);
    }

    #[test]
    fn test_filter_ignores_case_and_keeps_order() {
        let entries = catalog(Language::English);

        assert_eq!(
            labels_of(&filter(&entries, "BLOCK")),
            vec!["D-block", "E-block", "A-block"]
        );
        assert_eq!(
            labels_of(&filter(&entries, "gate")),
            vec!["Main Gate", "Back Gate"]
        );
        assert!(filter(&entries, "gymnasium").is_empty());
    }

    #[test]
    fn test_filter_translated_labels() {
        let entries = catalog(Language::Telugu);

        assert_eq!(
            labels_of(&filter(&entries, "గేట్")),
            vec!["ప్రధాన గేట్", "బ్యాక్ గేట్"]
        );
        assert_eq!(labels_of(&filter(&entries, "e303")), vec!["E303"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let entries = catalog(Language::English);

        for query in &["", "a", "Lab", "e", "303", "zzz"] {
            let once = filter(&entries, query);
            assert_eq!(filter(&once, query), once);
        }
    }
}
