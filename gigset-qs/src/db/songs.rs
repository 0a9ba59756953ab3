//! Song catalog writes

use gigset_common::{match_key, Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Add a song with its artists to the catalog
///
/// Artists are reused when a name already exists (ignoring case, including
/// non-ASCII letters).
pub async fn insert_song(pool: &SqlitePool, title: &str, artists: &[String]) -> Result<Uuid> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("Song title must not be empty".to_string()));
    }

    let song_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO songs (guid, title, title_key) VALUES (?, ?, ?)")
        .bind(song_id.to_string())
        .bind(title)
        .bind(match_key(title))
        .execute(&mut *tx)
        .await?;

    for name in artists.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        let existing: Option<(String,)> =
            sqlx::query_as("SELECT guid FROM artists WHERE name_key = ?")
                .bind(match_key(name))
                .fetch_optional(&mut *tx)
                .await?;

        let artist_id = match existing {
            Some((guid,)) => guid,
            None => {
                let guid = Uuid::new_v4().to_string();
                sqlx::query("INSERT INTO artists (guid, name, name_key) VALUES (?, ?, ?)")
                    .bind(&guid)
                    .bind(name)
                    .bind(match_key(name))
                    .execute(&mut *tx)
                    .await?;
                guid
            }
        };

        sqlx::query("INSERT OR IGNORE INTO song_artists (song_id, artist_id) VALUES (?, ?)")
            .bind(song_id.to_string())
            .bind(&artist_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(song_id = %song_id, title = %title, artists = artists.len(), "Inserted catalog song");

    Ok(song_id)
}
