//! Level string normalization.
//!
//! A `level` value is matched case-insensitively against six tokens and
//! mapped onto an OpenTelemetry [`Severity`]. Anything else has no
//! severity number; the record only keeps the raw text.

use std::collections::BTreeSet;

use opentelemetry::logs::Severity;
use parking_lot::{const_mutex, Mutex};

/// Level tokens in ascending severity with their normalized value.
pub const LEVELS: [(&str, Severity); 6] = [
    ("debug", Severity::Debug),
    ("info", Severity::Info),
    ("warn", Severity::Warn),
    ("error", Severity::Error),
    ("panic", Severity::Fatal),
    ("fatal", Severity::Fatal2),
];

/// Placeholder text once the interned set is full and the level is not a
/// known token.
pub const UNDEFINED_TEXT: &str = "undefined";

const MAX_INTERNED: usize = 128;

static INTERNED: Mutex<BTreeSet<&'static str>> = const_mutex(BTreeSet::new());

/// Normalize a level string. `None` means undefined.
pub fn from_level(level: &str) -> Option<Severity> {
    LEVELS
        .iter()
        .find(|(token, _)| token.eq_ignore_ascii_case(level))
        .map(|(_, severity)| *severity)
}

/// Severity text for a record. Records only hold `&'static str`, so
/// common spellings come from a fixed table and other strings are leaked
/// into a bounded set. Past 128 distinct strings an unknown
/// spelling degrades to its lowercase token, or [`UNDEFINED_TEXT`].
pub fn severity_text(level: &str) -> &'static str {
    if let Some(text) = known_spelling(level) {
        return text;
    }

    let mut interned = INTERNED.lock();
    if let Some(text) = interned.get(level) {
        return *text;
    }
    if interned.len() < MAX_INTERNED {
        let text: &'static str = Box::leak(level.to_owned().into_boxed_str());
        interned.insert(text);
        return text;
    }
    drop(interned);

    LEVELS
        .iter()
        .find(|(token, _)| token.eq_ignore_ascii_case(level))
        .map(|(token, _)| *token)
        .unwrap_or(UNDEFINED_TEXT)
}

fn known_spelling(level: &str) -> Option<&'static str> {
    const SPELLINGS: [&str; 18] = [
        "debug", "DEBUG", "Debug", "info", "INFO", "Info", "warn", "WARN", "Warn", "error",
        "ERROR", "Error", "panic", "PANIC", "Panic", "fatal", "FATAL", "Fatal",
    ];
    SPELLINGS.iter().find(|s| **s == level).copied()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tokens_map_to_severities() {
        assert_eq!(from_level("debug"), Some(Severity::Debug));
        assert_eq!(from_level("INFO"), Some(Severity::Info));
        assert_eq!(from_level("InFo"), Some(Severity::Info));
        assert_eq!(from_level("Warn"), Some(Severity::Warn));
        assert_eq!(from_level("error"), Some(Severity::Error));
        assert_eq!(from_level("panic"), Some(Severity::Fatal));
        assert_eq!(from_level("FATAL"), Some(Severity::Fatal2));
    }

    #[test]
    fn no_partial_matches() {
        assert_eq!(from_level("bogus"), None);
        assert_eq!(from_level("warning"), None);
        assert_eq!(from_level(" info"), None);
        assert_eq!(from_level(""), None);
    }

    #[test]
    fn text_is_preserved_verbatim() {
        assert_eq!(severity_text("info"), "info");
        assert_eq!(severity_text("bogus"), "bogus");
        assert_eq!(severity_text("iNfO"), "iNfO");
        // same leaked str on repeat
        assert!(std::ptr::eq(severity_text("notice"), severity_text("notice")));
    }

    proptest! {
        #[test]
        fn normalization_ignores_case(level in "\\PC{0,12}") {
            prop_assert_eq!(from_level(&level), from_level(&level.to_ascii_uppercase()));
            prop_assert_eq!(from_level(&level), from_level(&level.to_ascii_lowercase()));

            let lower = level.to_ascii_lowercase();
            let is_token = LEVELS.iter().any(|(token, _)| *token == lower);
            prop_assert_eq!(from_level(&level).is_some(), is_token);
        }

        #[test]
        fn every_case_variant_of_a_token_normalizes(
            index in 0usize..LEVELS.len(),
            mask in proptest::collection::vec(any::<bool>(), 5),
        ) {
            let (token, expected) = LEVELS[index];
            let variant: String = token
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();

            prop_assert_eq!(from_level(&variant), Some(expected));
        }
    }
}
