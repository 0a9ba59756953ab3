//! Quick-set draft: pasted text to a band-linked setlist proposal
//!
//! Parses the text, looks up catalog matches for every song, and decides per
//! song whether to link an existing catalog entry, ask the user, or create a
//! new song. Persisting the draft is left to the caller.

use crate::matcher::SongMatcher;
use crate::models::{MatchType, ParsedSong, SongMatch, MAYBE_SET_NUMBER};
use crate::parser::SetlistTextParser;
use crate::selection::SelectionPolicy;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Storage key for a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetKey {
    #[serde(rename = "Set_1")]
    Set1,
    #[serde(rename = "Set_2")]
    Set2,
    #[serde(rename = "Set_3")]
    Set3,
    #[serde(rename = "Set_4")]
    Set4,
    Maybe,
}

impl SetKey {
    /// Sets 1-4 keep their number; everything else is Maybe
    pub fn from_set_number(set_number: u32) -> Self {
        match set_number {
            1 => SetKey::Set1,
            2 => SetKey::Set2,
            3 => SetKey::Set3,
            4 => SetKey::Set4,
            _ => SetKey::Maybe,
        }
    }

    pub fn set_number(&self) -> u32 {
        match self {
            SetKey::Set1 => 1,
            SetKey::Set2 => 2,
            SetKey::Set3 => 3,
            SetKey::Set4 => 4,
            SetKey::Maybe => MAYBE_SET_NUMBER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetKey::Set1 => "Set_1",
            SetKey::Set2 => "Set_2",
            SetKey::Set3 => "Set_3",
            SetKey::Set4 => "Set_4",
            SetKey::Maybe => "Maybe",
        }
    }
}

impl fmt::Display for SetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a parsed song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Resolution {
    /// Link to an existing catalog song without asking
    Link {
        song_id: Uuid,
        match_type: MatchType,
        confidence: f64,
    },
    /// Matches exist but the user has to pick (or reject) one
    Suggest,
    /// No catalog candidates; create a new song
    CreateNew,
}

/// A parsed song with its candidates and proposed resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEntry {
    pub song: ParsedSong,
    pub matches: Vec<SongMatch>,
    pub resolution: Resolution,
}

/// One set of the draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSet {
    pub name: String,
    pub set_number: u32,
    pub set_key: SetKey,
    pub entries: Vec<DraftEntry>,
}

/// Proposed setlist built from pasted text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickSetDraft {
    pub sets: Vec<DraftSet>,
    pub errors: Vec<String>,
}

impl QuickSetDraft {
    pub fn entries(&self) -> impl Iterator<Item = &DraftEntry> {
        self.sets.iter().flat_map(|s| s.entries.iter())
    }

    pub fn linked(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Link { .. }))
    }

    pub fn suggested(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Suggest))
    }

    pub fn new_songs(&self) -> usize {
        self.count(|r| matches!(r, Resolution::CreateNew))
    }

    fn count(&self, pred: impl Fn(&Resolution) -> bool) -> usize {
        self.entries().filter(|e| pred(&e.resolution)).count()
    }
}

/// Runs parse, match and selection for pasted text
#[derive(Clone)]
pub struct QuickSetBuilder {
    parser: SetlistTextParser,
    matcher: SongMatcher,
    policy: SelectionPolicy,
}

impl QuickSetBuilder {
    pub fn new(matcher: SongMatcher, policy: SelectionPolicy) -> Self {
        Self {
            parser: SetlistTextParser::new(),
            matcher,
            policy,
        }
    }

    /// Build a draft from pasted text
    ///
    /// Matching for the individual songs runs concurrently.
    pub async fn prepare(&self, text: &str) -> QuickSetDraft {
        let parsed = self.parser.parse(text);

        let lookups = parsed
            .songs
            .iter()
            .map(|song| self.matcher.find_matches(&song.title, &song.artist));
        let all_matches = join_all(lookups).await;

        let mut sets: Vec<DraftSet> = parsed
            .sets
            .iter()
            .map(|set| DraftSet {
                name: set.name.clone(),
                set_number: set.set_number,
                set_key: SetKey::from_set_number(set.set_number),
                entries: Vec::new(),
            })
            .collect();

        for (song, matches) in parsed.songs.into_iter().zip(all_matches) {
            let resolution = self.resolve(&matches);
            if let Some(set) = sets.iter_mut().find(|s| s.set_number == song.set_number) {
                set.entries.push(DraftEntry {
                    song,
                    matches,
                    resolution,
                });
            }
        }

        let draft = QuickSetDraft {
            sets,
            errors: parsed.errors,
        };

        tracing::info!(
            sets = draft.sets.len(),
            linked = draft.linked(),
            suggested = draft.suggested(),
            new_songs = draft.new_songs(),
            errors = draft.errors.len(),
            "Quick set draft prepared"
        );

        draft
    }

    fn resolve(&self, matches: &[SongMatch]) -> Resolution {
        match self.policy.select(matches) {
            Some(chosen) => Resolution::Link {
                song_id: chosen.song_id,
                match_type: chosen.match_type,
                confidence: chosen.confidence,
            },
            None if matches.is_empty() => Resolution::CreateNew,
            None => Resolution::Suggest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_mapping() {
        assert_eq!(SetKey::from_set_number(1), SetKey::Set1);
        assert_eq!(SetKey::from_set_number(4), SetKey::Set4);
        assert_eq!(SetKey::from_set_number(MAYBE_SET_NUMBER), SetKey::Maybe);
        assert_eq!(SetKey::from_set_number(7), SetKey::Maybe);
        assert_eq!(SetKey::Set2.to_string(), "Set_2");
        assert_eq!(SetKey::Maybe.set_number(), MAYBE_SET_NUMBER);
    }

    #[test]
    fn test_set_key_serializes_as_storage_key() {
        assert_eq!(serde_json::to_string(&SetKey::Set3).unwrap(), "\"Set_3\"");
        assert_eq!(serde_json::to_string(&SetKey::Maybe).unwrap(), "\"Maybe\"");
    }

    #[test]
    fn test_resolution_serialization() {
        let json = serde_json::to_value(Resolution::CreateNew).unwrap();
        assert_eq!(json["action"], "create_new");
    }
}
