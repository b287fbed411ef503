//! Deciding whether one search term adds nothing over another.
//!
//! Terms are compared as sets of normalized tokens, so word order, casing,
//! punctuation and diacritics don't matter, and extra tokens in the longer
//! term (narrator credits, bitrate labels) don't prevent a match.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use unaccent::unaccent;

/// Words that only join other tokens ("Title by Author")
const CONNECTOR_WORDS: &[&str] = &["by"];

static NON_TOKEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid regex"));

/// How two token sets relate when one contains the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Same tokens on both sides
    Equal,
    /// The first term's tokens are a strict subset of the second's
    FirstInSecond,
    /// The second term's tokens are a strict subset of the first's
    SecondInFirst,
}

/// Normalize a term into its set of comparable tokens.
///
/// Strips diacritics, lowercases, reads `&` as "and", replaces punctuation
/// with spaces and drops connector words.
pub fn normalize_for_comparison(text: &str) -> BTreeSet<String> {
    let folded = unaccent(text).to_lowercase().replace('&', " and ");

    NON_TOKEN_CHARS
        .replace_all(&folded, " ")
        .split_whitespace()
        .filter(|token| !CONNECTOR_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Compare two terms; `None` when neither contains the other or when either
/// has no tokens at all.
pub fn containment(first: &str, second: &str) -> Option<Containment> {
    let first = normalize_for_comparison(first);
    let second = normalize_for_comparison(second);

    if first.is_empty() || second.is_empty() {
        return None;
    }

    if first == second {
        Some(Containment::Equal)
    } else if first.is_subset(&second) {
        Some(Containment::FirstInSecond)
    } else if second.is_subset(&first) {
        Some(Containment::SecondInFirst)
    } else {
        None
    }
}

/// True when one term's tokens are wholly contained in the other's.
pub fn is_redundant(first: &str, second: &str) -> bool {
    containment(first, second).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_for_comparison() {
        assert_eq!(
            normalize_for_comparison("Moje śliczne by Karin Slaughter"),
            tokens(&["moje", "sliczne", "karin", "slaughter"])
        );
        assert_eq!(
            normalize_for_comparison("Author - Title, Title!"),
            tokens(&["author", "title"])
        );
        assert_eq!(
            normalize_for_comparison("Tom & Jerry"),
            tokens(&["tom", "and", "jerry"])
        );
        assert!(normalize_for_comparison(" - ... ").is_empty());
    }

    #[test]
    fn test_author_contained_in_folder() {
        assert!(is_redundant(
            "Karin Slaughter",
            "Slaughter Karin - Moje sliczne czyta Filip Kosior 224kbps"
        ));
    }

    #[test]
    fn test_same_data_different_format() {
        assert!(is_redundant("Title by Author", "Author - Title"));
        assert_eq!(
            containment("Title by Author", "Author - Title"),
            Some(Containment::Equal)
        );
    }

    #[test]
    fn test_diacritics_are_ignored() {
        assert!(is_redundant(
            "Moje śliczne by Karin Slaughter",
            "Slaughter Karin - Moje sliczne czyta Filip Kosior"
        ));
    }

    #[test]
    fn test_different_terms_are_not_redundant() {
        assert!(!is_redundant("Book Title", "Different Author"));
        // Partial overlap keeps both
        assert!(!is_redundant("Book Title by Author", "Author Other Book"));
    }

    #[test]
    fn test_empty_terms_are_not_redundant() {
        assert!(!is_redundant("", "Some Title"));
        assert!(!is_redundant("...", "Some Title"));
        assert!(!is_redundant("", ""));
    }

    #[test]
    fn test_redundancy_is_symmetric() {
        let pairs = [
            ("Karin Slaughter", "Slaughter Karin - Moje sliczne czyta"),
            ("Title by Author", "Author - Title"),
            ("Harry Potter", "harry potter and the philosopher's stone"),
        ];

        for (a, b) in pairs {
            assert!(is_redundant(a, b), "{a:?} / {b:?}");
            assert!(is_redundant(b, a), "{b:?} / {a:?}");
        }

        assert_eq!(
            containment("Karin Slaughter", "Slaughter Karin Moje"),
            Some(Containment::FirstInSecond)
        );
        assert_eq!(
            containment("Slaughter Karin Moje", "Karin Slaughter"),
            Some(Containment::SecondInFirst)
        );
    }
}
