//! Garbage detection and text cleaning for audiobook metadata.
//!
//! Folder names and embedded tags are both unreliable: folder names pick up
//! bracketed markers, release-site names and encoder labels, while tags are
//! often filled with a ripper's site name or a bare track number. This module
//! decides which values can be trusted and turns the rest into plain search
//! text.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::CleaningConfig;

// ============================================================================
// Pattern tables
// ============================================================================

/// Patterns that mark a value as garbage (matched case-insensitively).
pub const GARBAGE_PATTERNS: &[&str] = &[
    // Domain names
    r"\b[a-z0-9-]+\.(pl|com|net|org|io|de|uk|eu|ru)\b",
    // URLs
    r"https?://",
    r"www\.",
    // Audiobook distribution sites and teams
    r"\b(audiobook|exsite|audioteka|empik|legimi|storytel)\b",
    // File sharing / release markers
    r"\b(rarbg|yify|eztv|ettv|rip|hdtv)\b",
];

/// Values shorter than this (in characters, after trimming) are garbage.
const MIN_TEXT_LENGTH: usize = 3;

static BRACKET_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\[.*?\]").expect("square bracket pattern is valid"),
        Regex::new(r"\(.*?\)").expect("parenthesis pattern is valid"),
        Regex::new(r"\{.*?\}").expect("curly brace pattern is valid"),
    ]
});

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("separator pattern is valid"));

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static PUNCTUATION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\W_]+$").expect("valid regex"));

static EDGE_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\W_]+|[\W_]+$").expect("valid regex"));

static DEFAULT_CLEANER: LazyLock<MetadataCleaner> = LazyLock::new(build_default_cleaner);

fn build_default_cleaner() -> MetadataCleaner {
    MetadataCleaner::new(&CleaningConfig::default())
        .expect("built-in garbage patterns and thresholds are valid")
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CleanerError {
    #[error("Invalid garbage pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cleaning threshold `{name}` must be at least 1")]
    InvalidThreshold { name: &'static str },
}

// ============================================================================
// Cleaner
// ============================================================================

/// Garbage classifier and tag cleaner with its thresholds.
///
/// The free functions in this module use a shared instance built from
/// [`CleaningConfig::default`].
#[derive(Debug, Clone)]
pub struct MetadataCleaner {
    garbage: Regex,
    min_folder_length: usize,
    min_tag_letters: usize,
}

impl MetadataCleaner {
    pub fn new(config: &CleaningConfig) -> Result<Self, CleanerError> {
        // A zero folder length would let an empty folder name through as a term
        if config.min_folder_length == 0 {
            return Err(CleanerError::InvalidThreshold {
                name: "min_folder_length",
            });
        }
        if config.min_tag_letters == 0 {
            return Err(CleanerError::InvalidThreshold {
                name: "min_tag_letters",
            });
        }

        // Compile extra patterns one by one so a bad entry is reported by name
        for pattern in &config.extra_garbage_patterns {
            Regex::new(pattern).map_err(|source| CleanerError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        let combined = GARBAGE_PATTERNS
            .iter()
            .copied()
            .chain(config.extra_garbage_patterns.iter().map(String::as_str))
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|");
        let combined = format!("(?i){combined}");
        let garbage = Regex::new(&combined).map_err(|source| CleanerError::InvalidPattern {
            pattern: combined.clone(),
            source,
        })?;

        Ok(Self {
            garbage,
            min_folder_length: config.min_folder_length,
            min_tag_letters: config.min_tag_letters,
        })
    }

    /// Check whether a value is untrustworthy metadata (domains, URLs, site
    /// names, punctuation, too short to mean anything).
    pub fn is_garbage(&self, text: &str) -> bool {
        let text = text.trim();

        if text.chars().count() < MIN_TEXT_LENGTH {
            return true;
        }

        if self.garbage.is_match(text) {
            return true;
        }

        PUNCTUATION_ONLY.is_match(text)
    }

    /// Light cleaning for a single tag value.
    ///
    /// Returns an empty string when the value is garbage or has too few
    /// letters left to be a real title or name ("1. I"). Internal dashes are
    /// kept since tag titles legitimately contain " - ".
    pub fn clean_id3_field(&self, value: &str) -> String {
        if self.is_garbage(value) {
            log::trace!("Rejecting garbage tag value: {value:?}");
            return String::new();
        }

        let stripped = EDGE_NON_WORD.replace_all(value.trim(), "");
        let result = WHITESPACE_RUNS
            .replace_all(&stripped, " ")
            .trim()
            .to_string();

        // Track numbers carry no letters, so this only looks at what follows them
        if letter_count(&result) < self.min_tag_letters {
            log::trace!("Rejecting tag value with too few letters: {value:?}");
            return String::new();
        }

        result
    }

    /// Whether a cleaned folder name is long enough to search with.
    pub fn is_usable_folder_name(&self, cleaned: &str) -> bool {
        cleaned.chars().count() >= self.min_folder_length
    }
}

impl Default for MetadataCleaner {
    fn default() -> Self {
        DEFAULT_CLEANER.clone()
    }
}

/// The shared cleaner built from the default configuration.
pub fn default_cleaner() -> &'static MetadataCleaner {
    &DEFAULT_CLEANER
}

fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

// ============================================================================
// Free functions
// ============================================================================

/// See [`MetadataCleaner::is_garbage`].
pub fn is_garbage(text: &str) -> bool {
    DEFAULT_CLEANER.is_garbage(text)
}

/// See [`MetadataCleaner::clean_id3_field`].
pub fn clean_id3_field(value: &str) -> String {
    DEFAULT_CLEANER.clean_id3_field(value)
}

/// Title and author holding the same text is a sign of a broken ripper.
/// Missing or blank (whitespace-only) values never count as duplicates, so two
/// blank fields are not flagged here; `extract` still catches them as garbage.
pub fn is_duplicate_fields(title: Option<&str>, author: Option<&str>) -> bool {
    match (title.map(str::trim), author.map(str::trim)) {
        (Some(title), Some(author)) if !title.is_empty() && !author.is_empty() => {
            title.to_lowercase() == author.to_lowercase()
        }
        _ => false,
    }
}

/// Clean text for use as a search term.
///
/// `remove_brackets` drops `[...]`, `(...)` and `{...}` groups (shortest match,
/// nesting is not tracked). `remove_special_chars` turns dash/underscore runs
/// and colons into spaces and collapses whitespace.
pub fn clean_text(text: &str, remove_brackets: bool, remove_special_chars: bool) -> String {
    let mut result = text.trim().to_string();

    if remove_brackets {
        for pattern in BRACKET_PATTERNS.iter() {
            result = pattern.replace_all(&result, "").into_owned();
        }
    }

    if remove_special_chars {
        result = SEPARATOR_RUNS.replace_all(&result, " ").into_owned();
        result = result.replace(':', " ");
        result = WHITESPACE_RUNS.replace_all(&result, " ").into_owned();
    }

    result.trim().to_string()
}

/// Aggressive cleaning for folder names, the noisiest source.
pub fn clean_folder_name(folder_name: &str) -> String {
    clean_text(folder_name, true, true)
}

// ============================================================================
// Tests
// ============================================================================
