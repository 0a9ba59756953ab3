//! Auto-selection policy for match results
//!
//! A match is pre-selected when it is exact or its confidence reaches the
//! configured threshold. Anything else is only a suggestion and needs the
//! user to confirm it.

use crate::models::{MatchType, SongMatch};
use gigset_common::config::{MatchingConfig, DEFAULT_AUTO_SELECT_CONFIDENCE};

/// Decides which match, if any, is linked without asking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    /// Confidence at or above which a non-exact match is pre-selected
    pub auto_select_confidence: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            auto_select_confidence: DEFAULT_AUTO_SELECT_CONFIDENCE,
        }
    }
}

impl SelectionPolicy {
    pub fn new(auto_select_confidence: f64) -> Self {
        Self {
            auto_select_confidence,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.auto_select_confidence)
    }

    pub fn is_auto_selectable(&self, candidate: &SongMatch) -> bool {
        candidate.match_type == MatchType::Exact
            || candidate.confidence >= self.auto_select_confidence
    }

    /// First auto-selectable match (input is expected highest confidence first)
    pub fn select<'a>(&self, matches: &'a [SongMatch]) -> Option<&'a SongMatch> {
        matches.iter().find(|m| self.is_auto_selectable(m))
    }
}
