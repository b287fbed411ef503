//! Turning a folder name and audio tags into ranked search terms.

use std::path::Path;

use serde::Serialize;

use crate::metadata_cleaning::{
    MetadataCleaner, clean_folder_name, default_cleaner, is_duplicate_fields,
};
use crate::redundancy::{Containment, containment};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderVerdict {
    pub raw: String,
    pub cleaned: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagVerdict {
    pub title: String,
    pub author: String,
    pub album: String,
    /// Title and author both survived cleaning
    pub valid: bool,
    /// A raw field was garbage, or title and author were duplicates
    pub garbage_detected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceVerdicts {
    pub folder: FolderVerdict,
    pub id3: TagVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Id3,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchAlternative {
    pub source: Source,
    pub term: String,
    /// 1 is tried first
    pub priority: u32,
    pub details: String,
}

// ============================================================================
// Extraction
// ============================================================================

impl MetadataCleaner {
    /// Clean and validate both sources for one audiobook folder.
    ///
    /// `folder` may be a full path or just the folder's name; only the last
    /// component is used.
    pub fn extract(
        &self,
        folder: &str,
        id3_title: Option<&str>,
        id3_author: Option<&str>,
        id3_album: Option<&str>,
    ) -> SourceVerdicts {
        let raw = folder_leaf_name(folder);
        let cleaned = clean_folder_name(&raw);
        let folder = FolderVerdict {
            valid: self.is_usable_folder_name(&cleaned),
            raw,
            cleaned,
        };

        let title = self.clean_optional_field(id3_title);
        let author = self.clean_optional_field(id3_author);
        let album = self.clean_optional_field(id3_album);

        // Duplicates are checked on raw values, a cleaned pair could differ
        let garbage_detected = self.is_raw_garbage(id3_title)
            || self.is_raw_garbage(id3_author)
            || is_duplicate_fields(id3_title, id3_author);

        if garbage_detected {
            log::debug!(
                "Garbage tags for folder {:?}: title={:?}, author={:?}",
                folder.raw,
                id3_title,
                id3_author
            );
        }

        let id3 = TagVerdict {
            valid: !title.is_empty() && !author.is_empty(),
            title,
            author,
            album,
            garbage_detected,
        };

        SourceVerdicts { folder, id3 }
    }

    fn clean_optional_field(&self, value: Option<&str>) -> String {
        value.map(|v| self.clean_id3_field(v)).unwrap_or_default()
    }

    fn is_raw_garbage(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| !v.is_empty() && self.is_garbage(v))
    }
}

/// Extract verdicts with the default cleaner.
pub fn extract(
    folder: &str,
    id3_title: Option<&str>,
    id3_author: Option<&str>,
    id3_album: Option<&str>,
) -> SourceVerdicts {
    default_cleaner().extract(folder, id3_title, id3_author, id3_album)
}

fn folder_leaf_name(folder: &str) -> String {
    Path::new(folder)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.to_string())
}

// ============================================================================
// Alternative generation
// ============================================================================

struct Candidate {
    source: Source,
    term: String,
    details: String,
}

fn id3_candidate(id3: &TagVerdict) -> Option<Candidate> {
    if !id3.valid || id3.garbage_detected {
        return None;
    }

    let mut details = format!("Title: {}, Author: {}", id3.title, id3.author);
    if !id3.album.is_empty() {
        details.push_str(&format!(", Album: {}", id3.album));
    }

    Some(Candidate {
        source: Source::Id3,
        term: format!("{} by {}", id3.title, id3.author),
        details,
    })
}

fn folder_candidate(folder: &FolderVerdict) -> Option<Candidate> {
    folder.valid.then(|| Candidate {
        source: Source::Folder,
        term: folder.cleaned.clone(),
        details: format!("Folder: {}", folder.raw),
    })
}

/// Build the ranked list of search terms to try.
///
/// The tag-based term comes first. When one term's tokens contain the
/// other's, only one is kept: the tag term if it covers the folder, otherwise
/// the folder term. Returns an empty list when neither source is usable.
pub fn generate(verdicts: &SourceVerdicts) -> Vec<SearchAlternative> {
    let id3 = id3_candidate(&verdicts.id3);
    let folder = folder_candidate(&verdicts.folder);

    let candidates = match (id3, folder) {
        (Some(id3), Some(folder)) => match containment(&id3.term, &folder.term) {
            Some(Containment::Equal | Containment::SecondInFirst) => {
                log::debug!(
                    "Dropping folder term {:?}, covered by {:?}",
                    folder.term,
                    id3.term
                );
                vec![id3]
            }
            Some(Containment::FirstInSecond) => {
                log::debug!(
                    "Dropping tag term {:?}, covered by {:?}",
                    id3.term,
                    folder.term
                );
                vec![folder]
            }
            None => vec![id3, folder],
        },
        (id3, folder) => id3.into_iter().chain(folder).collect(),
    };

    candidates
        .into_iter()
        .zip(1..)
        .map(|(candidate, priority)| SearchAlternative {
            source: candidate.source,
            term: candidate.term,
            priority,
            details: candidate.details,
        })
        .collect()
}

/// The term to search with first, or the raw folder name when no
/// alternative survived.
pub fn best_search_term(alternatives: &[SearchAlternative], folder: &str) -> String {
    alternatives
        .iter()
        .min_by_key(|alt| alt.priority)
        .map(|alt| alt.term.clone())
        .unwrap_or_else(|| folder_leaf_name(folder))
}

// ============================================================================
// Tests
// ============================================================================
