//! SQLite-backed catalog lookup

use super::{CatalogError, CatalogLookup};
use async_trait::async_trait;
use gigset_common::{match_key, CatalogSong};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Catalog over the `songs` / `artists` / `song_artists` tables
///
/// Exact lookups compare the stored `title_key` / `name_key` columns, which
/// hold [`match_key`] of the original text. SQLite's NOCASE only folds ASCII.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db: SqlitePool,
}

type SongArtistRow = (String, String, Option<String>);

impl SqliteCatalog {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogLookup for SqliteCatalog {
    async fn find_exact_matches(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CatalogSong>, CatalogError> {
        let title_key = match_key(title);
        let artist_key = artist.map(match_key).filter(|a| !a.is_empty());

        let rows: Vec<SongArtistRow> = sqlx::query_as(
            r#"
            WITH picked AS (
                SELECT s.guid, s.title
                FROM songs s
                WHERE s.title_key = ?
                  AND (
                    ? IS NULL OR EXISTS (
                        SELECT 1
                        FROM song_artists sa
                        JOIN artists a ON a.guid = sa.artist_id
                        WHERE sa.song_id = s.guid AND a.name_key = ?
                    )
                  )
                ORDER BY s.title COLLATE NOCASE, s.guid
                LIMIT ?
            )
            SELECT p.guid, p.title, a.name
            FROM picked p
            LEFT JOIN song_artists sa ON sa.song_id = p.guid
            LEFT JOIN artists a ON a.guid = sa.artist_id
            ORDER BY p.title COLLATE NOCASE, p.guid, a.name
            "#,
        )
        .bind(&title_key)
        .bind(&artist_key)
        .bind(&artist_key)
        .bind(sql_limit(limit))
        .fetch_all(&self.db)
        .await?;

        group_rows(rows)
    }

    async fn list_candidate_pool(&self, limit: usize) -> Result<Vec<CatalogSong>, CatalogError> {
        let rows: Vec<SongArtistRow> = sqlx::query_as(
            r#"
            WITH picked AS (
                SELECT guid, title
                FROM songs
                ORDER BY title COLLATE NOCASE, guid
                LIMIT ?
            )
            SELECT p.guid, p.title, a.name
            FROM picked p
            LEFT JOIN song_artists sa ON sa.song_id = p.guid
            LEFT JOIN artists a ON a.guid = sa.artist_id
            ORDER BY p.title COLLATE NOCASE, p.guid, a.name
            "#,
        )
        .bind(sql_limit(limit))
        .fetch_all(&self.db)
        .await?;

        let songs = group_rows(rows)?;
        tracing::debug!(limit, candidates = songs.len(), "Loaded catalog candidate pool");
        Ok(songs)
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Fold (song, artist) rows, ordered by song, into one entry per song
fn group_rows(rows: Vec<SongArtistRow>) -> Result<Vec<CatalogSong>, CatalogError> {
    let mut songs: Vec<CatalogSong> = Vec::new();
    let mut current_guid: Option<String> = None;

    for (guid, title, artist) in rows {
        if current_guid.as_deref() != Some(guid.as_str()) {
            let song_id = Uuid::parse_str(&guid)
                .map_err(|e| CatalogError::Corrupt(format!("Invalid song UUID '{}': {}", guid, e)))?;
            songs.push(CatalogSong {
                song_id,
                title,
                artist_names: Vec::new(),
            });
            current_guid = Some(guid);
        }

        if let (Some(name), Some(song)) = (artist, songs.last_mut()) {
            song.artist_names.push(name);
        }
    }

    Ok(songs)
}
