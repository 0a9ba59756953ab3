//! Song matching against the catalog
//!
//! Three strategies, each only considering songs not already found:
//!
//! 1. **Exact**: case-insensitive title (and artist) equality, confidence 1.0.
//! 2. **Keyword**: share of significant title words in common, plus 0.2 when
//!    artist words overlap. Kept at 0.15 and above.
//! 3. **Fuzzy**: Levenshtein similarity, `0.7 * title + 0.3 * artist` when an
//!    artist is given. Kept above 0.3, and only used to fill remaining slots.
//!
//! At most [`MAX_MATCHES`] results are returned, highest confidence first.
//! Matching is advisory: a failed catalog lookup yields no suggestions.

pub mod keywords;
pub mod similarity;

use crate::catalog::{CatalogError, CatalogLookup};
use crate::models::{MatchType, SongMatch};
use gigset_common::config::{MatchingConfig, DEFAULT_CANDIDATE_POOL_LIMIT};
use gigset_common::CatalogSong;
use keywords::{extract_keywords, keyword_intersection};
use similarity::best_artist_similarity;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

pub use similarity::calculate_similarity;

/// Most matches returned for one title
pub const MAX_MATCHES: usize = 5;

/// Lowest keyword score kept
pub const KEYWORD_MIN_SCORE: f64 = 0.15;

/// Bonus when artist keywords overlap
pub const KEYWORD_ARTIST_BONUS: f64 = 0.2;

/// Fuzzy scores must exceed this
pub const FUZZY_MIN_SCORE: f64 = 0.3;

const FUZZY_TITLE_WEIGHT: f64 = 0.7;
const FUZZY_ARTIST_WEIGHT: f64 = 0.3;

/// Finds catalog songs resembling a freeform title/artist
#[derive(Clone)]
pub struct SongMatcher {
    catalog: Arc<dyn CatalogLookup>,
    candidate_pool_limit: usize,
}

impl SongMatcher {
    /// Create matcher with the default candidate pool limit
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            catalog,
            candidate_pool_limit: DEFAULT_CANDIDATE_POOL_LIMIT,
        }
    }

    /// Create matcher from configuration
    pub fn with_config(catalog: Arc<dyn CatalogLookup>, config: &MatchingConfig) -> Self {
        Self {
            catalog,
            candidate_pool_limit: config.candidate_pool_limit.max(1),
        }
    }

    pub fn candidate_pool_limit(&self) -> usize {
        self.candidate_pool_limit
    }

    /// Ranked candidate matches for `title` (and optional `artist`)
    ///
    /// Never fails: lookup errors are logged and produce an empty list.
    pub async fn find_matches(&self, title: &str, artist: &str) -> Vec<SongMatch> {
        match self.try_find_matches(title, artist).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    artist = %artist,
                    error = %e,
                    "Catalog lookup failed, returning no matches"
                );
                Vec::new()
            }
        }
    }

    /// Same as [`find_matches`](Self::find_matches) but surfaces lookup errors
    pub async fn try_find_matches(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Vec<SongMatch>, CatalogError> {
        let title = title.trim();
        let artist = artist.trim();
        if title.is_empty() {
            return Ok(Vec::new());
        }

        let artist_filter = (!artist.is_empty()).then_some(artist);

        let mut matches: Vec<SongMatch> = self
            .catalog
            .find_exact_matches(title, artist_filter, MAX_MATCHES)
            .await?
            .into_iter()
            .take(MAX_MATCHES)
            .map(exact_match)
            .collect();

        let mut selected: HashSet<Uuid> = matches.iter().map(|m| m.song_id).collect();
        let exact_count = matches.len();

        let pool = self
            .catalog
            .list_candidate_pool(self.candidate_pool_limit)
            .await?;

        let keyword = keyword_matches(title, artist, &pool, &selected);
        selected.extend(keyword.iter().map(|m| m.song_id));
        let keyword_count = keyword.len();
        matches.extend(keyword);

        let mut fuzzy_count = 0;
        if matches.len() < MAX_MATCHES {
            let needed = MAX_MATCHES - matches.len();
            let fuzzy = fuzzy_matches(title, artist, &pool, &selected, needed);
            fuzzy_count = fuzzy.len();
            matches.extend(fuzzy);
        }

        sort_by_confidence(&mut matches);
        matches.truncate(MAX_MATCHES);

        tracing::debug!(
            title = %title,
            artist = %artist,
            pool = pool.len(),
            exact = exact_count,
            keyword = keyword_count,
            fuzzy = fuzzy_count,
            top_confidence = ?matches.first().map(|m| m.confidence),
            "Song matching complete"
        );

        Ok(matches)
    }
}

fn exact_match(song: CatalogSong) -> SongMatch {
    to_match(&song, MatchType::Exact, 1.0, Vec::new())
}

fn to_match(
    song: &CatalogSong,
    match_type: MatchType,
    confidence: f64,
    matched_keywords: Vec<String>,
) -> SongMatch {
    SongMatch {
        song_id: song.song_id,
        title: song.title.clone(),
        artist_names: song.artist_names.iter().cloned().collect(),
        match_type,
        confidence: confidence.clamp(0.0, 1.0),
        matched_keywords,
    }
}

/// Highest confidence first; ties keep strategy order
fn sort_by_confidence(matches: &mut [SongMatch]) {
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

/// Significant-word overlap scoring over the candidate pool
fn keyword_matches(
    title: &str,
    artist: &str,
    pool: &[CatalogSong],
    exclude: &HashSet<Uuid>,
) -> Vec<SongMatch> {
    let input_keywords = extract_keywords(title);
    if input_keywords.is_empty() {
        return Vec::new();
    }
    let artist_keywords = extract_keywords(artist);

    let mut scored: Vec<SongMatch> = pool
        .iter()
        .filter(|song| !exclude.contains(&song.song_id))
        .filter_map(|song| {
            let candidate_keywords = extract_keywords(&song.title);
            if candidate_keywords.is_empty() {
                return None;
            }

            let matched = keyword_intersection(&input_keywords, &candidate_keywords);
            if matched.is_empty() {
                return None;
            }

            let mut score =
                matched.len() as f64 / input_keywords.len().max(candidate_keywords.len()) as f64;

            if !artist_keywords.is_empty() && artist_overlaps(&artist_keywords, &song.artist_names) {
                score += KEYWORD_ARTIST_BONUS;
            }

            (score >= KEYWORD_MIN_SCORE).then(|| to_match(song, MatchType::Keyword, score, matched))
        })
        .collect();

    sort_by_confidence(&mut scored);
    scored.truncate(MAX_MATCHES);
    scored
}

fn artist_overlaps(artist_keywords: &[String], artist_names: &[String]) -> bool {
    artist_names.iter().any(|name| {
        let name_keywords = extract_keywords(name);
        !keyword_intersection(artist_keywords, &name_keywords).is_empty()
    })
}

/// Edit-distance scoring over the candidate pool, returning at most `needed`
fn fuzzy_matches(
    title: &str,
    artist: &str,
    pool: &[CatalogSong],
    exclude: &HashSet<Uuid>,
    needed: usize,
) -> Vec<SongMatch> {
    let mut scored: Vec<SongMatch> = pool
        .iter()
        .filter(|song| !exclude.contains(&song.song_id))
        .filter_map(|song| {
            let title_similarity = calculate_similarity(title, &song.title);
            let score = if artist.is_empty() {
                title_similarity
            } else {
                FUZZY_TITLE_WEIGHT * title_similarity
                    + FUZZY_ARTIST_WEIGHT * best_artist_similarity(artist, &song.artist_names)
            };

            (score > FUZZY_MIN_SCORE).then(|| to_match(song, MatchType::Fuzzy, score, Vec::new()))
        })
        .collect();

    sort_by_confidence(&mut scored);
    scored.truncate(needed);
    scored
}
