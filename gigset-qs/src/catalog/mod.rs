//! Song catalog lookup
//!
//! The catalog belongs to the caller. The matcher only needs two read-only
//! queries from it, expressed by [`CatalogLookup`].

pub mod sqlite;

use async_trait::async_trait;
use gigset_common::{match_key, CatalogSong};
use thiserror::Error;

pub use sqlite::SqliteCatalog;

/// Catalog lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Backing store could not be reached
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// Query failed
    #[error("Catalog query failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be interpreted
    #[error("Catalog data is corrupt: {0}")]
    Corrupt(String),
}

/// Read-only catalog queries used by the song matcher
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Songs whose title equals `title` ignoring case
    ///
    /// When `artist` is given, at least one of the song's artists must also
    /// equal it ignoring case. At most `limit` songs are returned.
    async fn find_exact_matches(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CatalogSong>, CatalogError>;

    /// Up to `limit` songs to score with keyword and fuzzy matching
    async fn list_candidate_pool(&self, limit: usize) -> Result<Vec<CatalogSong>, CatalogError>;
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    songs: Vec<CatalogSong>,
}

impl InMemoryCatalog {
    pub fn new(songs: Vec<CatalogSong>) -> Self {
        Self { songs }
    }

    pub fn push(&mut self, song: CatalogSong) {
        self.songs.push(song);
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn find_exact_matches(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CatalogSong>, CatalogError> {
        let wanted = match_key(title);
        let artist = artist.map(str::trim).filter(|a| !a.is_empty());

        Ok(self
            .songs
            .iter()
            .filter(|song| match_key(&song.title) == wanted)
            .filter(|song| artist.map_or(true, |a| song.has_artist(a)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_candidate_pool(&self, limit: usize) -> Result<Vec<CatalogSong>, CatalogError> {
        Ok(self.songs.iter().take(limit).cloned().collect())
    }
}
