//! Quick-set text parser
//!
//! Turns pasted setlist notes into sets and songs. Two input conventions are
//! supported:
//!
//! - **Header-based**: at least one line is a set header (`Set 1:`, `Set II`,
//!   `Encore`, `E`). Songs follow their header; songs before the first header
//!   go to Set 1. Repeated titles get a ` Reprise` suffix.
//! - **Blank-line separated**: no header anywhere. Each group of consecutive
//!   non-blank lines is a set, numbered 1-4 with the fifth group onward
//!   sharing the Maybe set.
//!
//! Parsing never fails; problem lines are reported in `ParseResult::errors`
//! and skipped.

pub mod header;
pub mod song_line;

use crate::models::{
    ParseResult, ParsedSet, ParsedSong, MAX_NUMBERED_SETS, MAYBE_SET_NUMBER,
};
use header::{Header, HeaderConvention};
use song_line::{parse_song_line, LineError};
use std::collections::HashSet;
use tracing::debug;

/// Added to the error list when nothing parsed
pub const NO_SONGS_MESSAGE: &str = "No songs found. Please enter at least one song.";

/// Suffix appended to repeated titles in header-based input
pub const REPRISE_SUFFIX: &str = " Reprise";

/// Input convention chosen for a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    HeaderBased,
    BlankLineSeparated,
}

/// Stateless parser for pasted setlist text
#[derive(Debug, Clone, Copy, Default)]
pub struct SetlistTextParser;

impl SetlistTextParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse pasted text into sets and songs
    pub fn parse(&self, input: &str) -> ParseResult {
        let lines: Vec<(usize, &str)> = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .collect();

        let format = detect_format(&lines);
        debug!(format = ?format, lines = lines.len(), "Parsing quick set text");

        let mut draft = match format {
            InputFormat::HeaderBased => parse_header_based(&lines),
            InputFormat::BlankLineSeparated => parse_blank_line_separated(&lines),
        };

        if format == InputFormat::HeaderBased {
            draft.songs = mark_reprises(draft.songs);
        }

        let result = draft.finish();

        debug!(
            sets = result.sets.len(),
            songs = result.songs.len(),
            errors = result.errors.len(),
            "Quick set text parsed"
        );

        result
    }
}

/// Convenience wrapper around [`SetlistTextParser::parse`]
pub fn parse(input: &str) -> ParseResult {
    SetlistTextParser::new().parse(input)
}

/// Header-based when any non-blank line is a header
pub fn detect_format(lines: &[(usize, &str)]) -> InputFormat {
    let has_header = lines
        .iter()
        .map(|(_, line)| line.trim())
        .filter(|line| !line.is_empty())
        .any(header::is_header);

    if has_header {
        InputFormat::HeaderBased
    } else {
        InputFormat::BlankLineSeparated
    }
}

/// Sets (in creation order) plus the flat song list before assembly
#[derive(Debug, Default)]
struct Draft {
    set_numbers: Vec<u32>,
    songs: Vec<ParsedSong>,
    errors: Vec<String>,
}

impl Draft {
    fn ensure_set(&mut self, set_number: u32) {
        if !self.set_numbers.contains(&set_number) {
            self.set_numbers.push(set_number);
        }
    }

    fn error(&mut self, error: LineError) {
        self.errors.push(error.to_string());
    }

    fn add_song_line(&mut self, line: &str, line_number: usize, set_number: u32) {
        match parse_song_line(line, line_number) {
            Ok(parsed) => self.songs.push(ParsedSong {
                title: parsed.title,
                artist: parsed.artist,
                set_number,
                line_number,
            }),
            Err(e) => self.error(e),
        }
    }

    /// Build the set views from the flat song list so both agree on titles
    fn finish(self) -> ParseResult {
        let mut sets: Vec<ParsedSet> = self
            .set_numbers
            .iter()
            .map(|&number| ParsedSet::new(number))
            .collect();

        for song in &self.songs {
            if let Some(set) = sets.iter_mut().find(|s| s.set_number == song.set_number) {
                set.songs.push(song.clone());
            }
        }

        let mut errors = self.errors;
        if self.songs.is_empty() {
            errors.push(NO_SONGS_MESSAGE.to_string());
        }

        ParseResult {
            sets,
            songs: self.songs,
            errors,
        }
    }
}

/// Numbers above the cap (or unknown) collapse into Maybe
fn effective_set_number(number: Option<u32>) -> u32 {
    match number {
        Some(n) if (1..=MAX_NUMBERED_SETS).contains(&n) => n,
        _ => MAYBE_SET_NUMBER,
    }
}

fn parse_header_based(lines: &[(usize, &str)]) -> Draft {
    let mut draft = Draft::default();

    let convention = lines
        .iter()
        .map(|(_, line)| line.trim())
        .find(|line| !line.is_empty())
        .map(HeaderConvention::detect)
        .unwrap_or(HeaderConvention::Bare);
    debug!(convention = ?convention, "Header convention detected");

    let mut current_set: Option<u32> = None;
    let mut highest_seen: u32 = 0;

    for &(line_number, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match convention.match_line(line) {
            Some(Header::Numbered { label, number }) => {
                match number {
                    Some(n) if n >= 1 => highest_seen = highest_seen.max(n),
                    _ => draft.error(LineError::UnrecognizedSetNumber {
                        line: line_number,
                        label,
                    }),
                }
                let set_number = effective_set_number(number.filter(|n| *n >= 1));
                draft.ensure_set(set_number);
                current_set = Some(set_number);
            }
            Some(Header::Encore) => {
                let set_number = (highest_seen + 1).min(MAX_NUMBERED_SETS);
                highest_seen = highest_seen.max(set_number);
                draft.ensure_set(set_number);
                current_set = Some(set_number);
            }
            None => {
                let set_number = match current_set {
                    Some(n) => n,
                    None => {
                        draft.ensure_set(1);
                        highest_seen = highest_seen.max(1);
                        current_set = Some(1);
                        1
                    }
                };
                draft.add_song_line(line, line_number, set_number);
            }
        }
    }

    draft
}

fn parse_blank_line_separated(lines: &[(usize, &str)]) -> Draft {
    let mut draft = Draft::default();
    let mut group_index: u32 = 0;
    let mut in_group = false;

    for &(line_number, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            in_group = false;
            continue;
        }

        if !in_group {
            in_group = true;
            group_index += 1;
            draft.ensure_set(effective_set_number(Some(group_index)));
        }

        draft.add_song_line(line, line_number, effective_set_number(Some(group_index)));
    }

    draft
}

/// Append ` Reprise` to the second and later occurrences of a title
///
/// Titles compare lowercased and trimmed across the whole setlist.
pub fn mark_reprises(songs: Vec<ParsedSong>) -> Vec<ParsedSong> {
    let mut seen: HashSet<String> = HashSet::new();

    songs
        .into_iter()
        .map(|mut song| {
            let key = song.title.trim().to_lowercase();
            if !seen.insert(key) {
                song.title.push_str(REPRISE_SUFFIX);
            }
            song
        })
        .collect()
}
