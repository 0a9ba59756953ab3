//! Catalog song model
//!
//! The catalog is owned by the caller; lookup adapters hand songs to the
//! matcher in this shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Case-folded comparison key for titles and artist names
///
/// Full Unicode lowercasing, so stored keys and lookups agree beyond ASCII.
pub fn match_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A previously known song together with the names of its artists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSong {
    /// Catalog identifier
    pub song_id: Uuid,
    /// Title as stored in the catalog
    pub title: String,
    /// Associated artist names (may be empty)
    pub artist_names: Vec<String>,
}

impl CatalogSong {
    /// Create a catalog song with a fresh identifier
    pub fn new(title: impl Into<String>, artist_names: Vec<String>) -> Self {
        Self {
            song_id: Uuid::new_v4(),
            title: title.into(),
            artist_names,
        }
    }

    /// True when any associated artist equals `artist` ignoring case
    pub fn has_artist(&self, artist: &str) -> bool {
        let wanted = match_key(artist);
        self.artist_names.iter().any(|name| match_key(name) == wanted)
    }
}
