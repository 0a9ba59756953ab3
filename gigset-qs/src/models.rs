//! Parser and matcher output types
//!
//! All values here are transient: nothing is persisted by this crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Highest numbered set a setlist may contain
pub const MAX_NUMBERED_SETS: u32 = 4;

/// Set number of the overflow ("Maybe") set
pub const MAYBE_SET_NUMBER: u32 = 999;

/// Display name of the overflow set
pub const MAYBE_SET_NAME: &str = "Maybe";

/// One song line recognised by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSong {
    /// Song title (never empty)
    pub title: String,
    /// Artist name, empty when the line had none
    pub artist: String,
    /// Set the song belongs to (1-4, or 999 for Maybe)
    pub set_number: u32,
    /// 1-based line in the pasted text
    pub line_number: usize,
}

/// A set of songs, unique by `set_number` within one parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSet {
    /// Display name ("Set 1" .. "Set 4", "Maybe")
    pub name: String,
    /// 1-4, or 999 for Maybe
    pub set_number: u32,
    /// Songs in input order
    pub songs: Vec<ParsedSong>,
}

impl ParsedSet {
    /// Create an empty set, naming it from its number
    pub fn new(set_number: u32) -> Self {
        Self {
            name: set_display_name(set_number),
            set_number,
            songs: Vec::new(),
        }
    }
}

/// Display name for a set number
pub fn set_display_name(set_number: u32) -> String {
    if set_number == MAYBE_SET_NUMBER {
        MAYBE_SET_NAME.to_string()
    } else {
        format!("Set {}", set_number)
    }
}

/// Result of parsing pasted setlist text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Sets in order of first appearance
    pub sets: Vec<ParsedSet>,
    /// Every song across all sets, in line order
    pub songs: Vec<ParsedSong>,
    /// Human-readable problems, prefixed with their line number where known
    pub errors: Vec<String>,
}

impl ParseResult {
    /// True when at least one song was recognised
    pub fn has_songs(&self) -> bool {
        !self.songs.is_empty()
    }

    /// Look up a set by number
    pub fn set(&self, set_number: u32) -> Option<&ParsedSet> {
        self.sets.iter().find(|s| s.set_number == set_number)
    }
}

/// Strategy that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Case-insensitive title (and artist) equality
    Exact,
    /// Significant-word overlap
    Keyword,
    /// Levenshtein similarity
    Fuzzy,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Keyword => "keyword",
            MatchType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate catalog song for a freeform title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMatch {
    /// Catalog identifier of the candidate
    pub song_id: Uuid,
    /// Catalog title of the candidate
    pub title: String,
    /// Candidate's artist names
    pub artist_names: BTreeSet<String>,
    /// Strategy that found it
    pub match_type: MatchType,
    /// Likelihood of being the same song (0.0-1.0)
    pub confidence: f64,
    /// Input keywords found in the candidate title (keyword matches only)
    pub matched_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_display_names() {
        assert_eq!(set_display_name(1), "Set 1");
        assert_eq!(set_display_name(4), "Set 4");
        assert_eq!(set_display_name(MAYBE_SET_NUMBER), "Maybe");
    }

    #[test]
    fn test_match_type_serializes_lowercase() {
        let json = serde_json::to_string(&MatchType::Keyword).unwrap();
        assert_eq!(json, "\"keyword\"");
    }
}
