//! Search-term extraction for audiobook lookups.
//!
//! Takes an audiobook's folder name and its (possibly broken) audio tags and
//! produces an ordered list of search terms for a book-metadata search.

pub mod config;
pub mod metadata_cleaning;
pub mod redundancy;
pub mod search_terms;

pub use metadata_cleaning::{
    CleanerError, MetadataCleaner, clean_folder_name, clean_id3_field, clean_text,
    is_duplicate_fields, is_garbage,
};
pub use redundancy::{is_redundant, normalize_for_comparison};
pub use search_terms::{
    FolderVerdict, SearchAlternative, Source, SourceVerdicts, TagVerdict, best_search_term,
    extract, generate,
};
