//! gigset-qs library interface
//!
//! Quick-set setlist entry: parse pasted setlist text, match each song
//! against the band's catalog, and propose which songs to link or create.

pub mod catalog;
pub mod db;
pub mod input;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod quickset;
pub mod selection;

pub use crate::catalog::{CatalogError, CatalogLookup, InMemoryCatalog, SqliteCatalog};
pub use crate::matcher::{calculate_similarity, SongMatcher};
pub use crate::models::{MatchType, ParseResult, ParsedSet, ParsedSong, SongMatch};
pub use crate::parser::{parse, SetlistTextParser};
pub use crate::quickset::{QuickSetBuilder, QuickSetDraft, Resolution, SetKey};
pub use crate::selection::SelectionPolicy;
