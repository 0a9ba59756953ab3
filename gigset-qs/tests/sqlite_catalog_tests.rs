//! Integration tests for the SQLite-backed catalog

use gigset_qs::db::{self, songs::insert_song};
use gigset_common::CatalogSong;
use gigset_qs::{CatalogLookup, InMemoryCatalog, MatchType, SongMatcher, SqliteCatalog};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Setup in-memory test database with catalog tables
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_tables(&pool).await.unwrap();
    pool
}

async fn seed(pool: &SqlitePool) {
    insert_song(pool, "Wild Horses", &["The Rolling Stones".to_string()]).await.unwrap();
    insert_song(pool, "Wild Horses", &["The Sundays".to_string()]).await.unwrap();
    insert_song(
        pool,
        "Ohio",
        &["Crosby".to_string(), "Stills".to_string(), "Nash".to_string(), "Young".to_string()],
    )
    .await
    .unwrap();
    insert_song(pool, "Untitled Jam", &[]).await.unwrap();
}

#[tokio::test]
async fn test_exact_matches_ignore_case() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let catalog = SqliteCatalog::new(pool);

    let found = catalog.find_exact_matches("wild HORSES", None, 5).await.unwrap();
    assert_eq!(found.len(), 2);

    let found = catalog
        .find_exact_matches("Wild Horses", Some("the rolling stones"), 5)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].artist_names, vec!["The Rolling Stones".to_string()]);
}

#[tokio::test]
async fn test_exact_matches_fold_non_ascii_case() {
    let pool = setup_test_db().await;
    insert_song(&pool, "Éléphant Blanc", &["Émile Trio".to_string()]).await.unwrap();
    let matcher = SongMatcher::new(Arc::new(SqliteCatalog::new(pool.clone())));
    let catalog = SqliteCatalog::new(pool);

    let found = catalog.find_exact_matches("éléphant blanc", None, 5).await.unwrap();
    assert_eq!(found.len(), 1);

    let found = catalog
        .find_exact_matches("ÉLÉPHANT BLANC", Some("émile trio"), 5)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let matches = matcher.find_matches("éléphant blanc", "ÉMILE TRIO").await;
    assert_eq!(matches[0].match_type, MatchType::Exact);
    assert_eq!(matches[0].confidence, 1.0);
}

#[tokio::test]
async fn test_sqlite_and_in_memory_agree_on_exact_matches() {
    let pool = setup_test_db().await;
    insert_song(&pool, "Ça Plane Pour Moi", &[]).await.unwrap();
    let sqlite = SqliteCatalog::new(pool);

    let mut memory = InMemoryCatalog::default();
    assert!(memory.is_empty());
    memory.push(CatalogSong::new("Ça Plane Pour Moi", Vec::new()));
    assert_eq!(memory.len(), 1);

    for query in ["ça plane pour moi", "ÇA PLANE POUR MOI", "Ca Plane Pour Moi"] {
        let from_sqlite = sqlite.find_exact_matches(query, None, 5).await.unwrap();
        let from_memory = memory.find_exact_matches(query, None, 5).await.unwrap();
        assert_eq!(from_sqlite.len(), from_memory.len(), "{query:?}");
    }
}

#[tokio::test]
async fn test_exact_matches_limit() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let catalog = SqliteCatalog::new(pool);

    let found = catalog.find_exact_matches("Wild Horses", None, 1).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_candidate_pool_groups_artists() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let catalog = SqliteCatalog::new(pool);

    let songs = catalog.list_candidate_pool(1000).await.unwrap();
    assert_eq!(songs.len(), 4);

    let ohio = songs.iter().find(|s| s.title == "Ohio").unwrap();
    assert_eq!(ohio.artist_names.len(), 4);

    let jam = songs.iter().find(|s| s.title == "Untitled Jam").unwrap();
    assert!(jam.artist_names.is_empty());
}

#[tokio::test]
async fn test_candidate_pool_limit_counts_songs_not_rows() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let catalog = SqliteCatalog::new(pool);

    // "Ohio" sorts first and has four artist rows
    let songs = catalog.list_candidate_pool(1).await.unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].title, "Ohio");
    assert_eq!(songs[0].artist_names.len(), 4);
}

#[tokio::test]
async fn test_matcher_over_sqlite_catalog() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let matcher = SongMatcher::new(Arc::new(SqliteCatalog::new(pool)));

    let matches = matcher.find_matches("Wild Horses", "The Rolling Stones").await;

    assert_eq!(matches[0].match_type, MatchType::Exact);
    assert!(matches[0].artist_names.contains("The Rolling Stones"));
    // The other "Wild Horses" still shows up as a keyword match
    assert_eq!(matches[1].match_type, MatchType::Keyword);
    assert!(matches[1].artist_names.contains("The Sundays"));
}

#[tokio::test]
async fn test_closed_pool_degrades_to_no_matches() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    pool.close().await;
    let matcher = SongMatcher::new(Arc::new(SqliteCatalog::new(pool)));

    assert!(matcher.find_matches("Ohio", "").await.is_empty());
}

#[tokio::test]
async fn test_file_database_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("gigset.db");

    {
        let pool = db::init_database_pool(&db_path).await.unwrap();
        insert_song(&pool, "Ripple", &["Grateful Dead".to_string()]).await.unwrap();
        pool.close().await;
    }

    let pool = db::init_database_pool(&db_path).await.unwrap();
    let catalog = SqliteCatalog::new(pool);
    let found = catalog.find_exact_matches("ripple", Some("grateful dead"), 5).await.unwrap();
    assert_eq!(found.len(), 1);
}
