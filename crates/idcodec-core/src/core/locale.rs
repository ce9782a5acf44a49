// crates/idcodec-core/src/core/locale.rs
// ============================================================================
// Module: Locale Raw Type
// Description: BCP-47 language tag wrapper used as an identifier component.
// Purpose: Provide a normalized, comparable locale value with a stable text form.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Locales travel on the wire as BCP-47 language tags. Parsing normalizes
//! subtag casing (`en-us` becomes `en-US`, `zh-hant-tw` becomes `zh-Hant-TW`)
//! so that equal locales always encode to the same text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Normalized BCP-47 language tag.
///
/// # Invariants
/// - Non-empty, `-`-separated ASCII alphanumeric subtags.
/// - Casing is canonical; see [`Locale::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Parses and normalizes a language tag.
    ///
    /// The first subtag is lower-cased, a four-letter script subtag is
    /// title-cased, a two-letter or three-digit region subtag is upper-cased
    /// and every other subtag is lower-cased. Everything after a singleton
    /// (extension or private-use marker) is lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] when the tag is empty, contains an empty
    /// subtag, or contains characters other than ASCII letters and digits.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }
        let mut normalized = String::with_capacity(tag.len());
        let mut region_seen = false;
        let mut after_singleton = false;
        for (index, subtag) in tag.split('-').enumerate() {
            if subtag.is_empty() {
                return Err(LocaleError::EmptySubtag {
                    tag: tag.to_string(),
                });
            }
            if !subtag.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                return Err(LocaleError::InvalidCharacter {
                    tag: tag.to_string(),
                });
            }
            if index > 0 {
                normalized.push('-');
            }
            let is_alpha = subtag.chars().all(|ch| ch.is_ascii_alphabetic());
            let is_digit = subtag.chars().all(|ch| ch.is_ascii_digit());
            if index == 0 || after_singleton {
                normalized.push_str(&subtag.to_ascii_lowercase());
            } else if subtag.len() == 1 {
                after_singleton = true;
                normalized.push_str(&subtag.to_ascii_lowercase());
            } else if !region_seen && subtag.len() == 4 && is_alpha {
                push_title_case(&mut normalized, subtag);
            } else if !region_seen && ((subtag.len() == 2 && is_alpha) || (subtag.len() == 3 && is_digit))
            {
                region_seen = true;
                normalized.push_str(&subtag.to_ascii_uppercase());
            } else {
                normalized.push_str(&subtag.to_ascii_lowercase());
            }
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized language tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Appends `subtag` with the first letter upper-cased and the rest lower-cased.
fn push_title_case(out: &mut String, subtag: &str) {
    for (index, ch) in subtag.chars().enumerate() {
        if index == 0 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing a language tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag was empty.
    #[error("language tag is empty")]
    Empty,
    /// The tag contained an empty subtag.
    #[error("language tag '{tag}' contains an empty subtag")]
    EmptySubtag {
        /// Offending tag.
        tag: String,
    },
    /// The tag contained a character outside `[A-Za-z0-9-]`.
    #[error("language tag '{tag}' contains an invalid character")]
    InvalidCharacter {
        /// Offending tag.
        tag: String,
    },
}
