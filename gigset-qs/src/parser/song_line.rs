//! Song line parsing: `Title[, Artist]`

use thiserror::Error;

/// Problem with a single input line
///
/// The rendered message is what callers see in `ParseResult::errors`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("Line {line}: Too many commas. Use format: Song Title, Artist")]
    TooManyCommas { line: usize },

    #[error("Line {line}: Empty song title")]
    EmptyTitle { line: usize },

    #[error("Line {line}: Unrecognized set number \"{label}\", song(s) moved to the Maybe set")]
    UnrecognizedSetNumber { line: usize, label: String },
}

/// Title and artist taken from one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongLine {
    pub title: String,
    pub artist: String,
}

/// Parse one non-header line
pub fn parse_song_line(line: &str, line_number: usize) -> Result<SongLine, LineError> {
    let parts: Vec<String> = line.split(',').map(clean_part).collect();

    if parts.len() > 2 {
        return Err(LineError::TooManyCommas { line: line_number });
    }

    let title = strip_segue(&parts[0]);
    if title.is_empty() {
        return Err(LineError::EmptyTitle { line: line_number });
    }

    let artist = parts.get(1).cloned().unwrap_or_default();

    Ok(SongLine {
        title: title.to_string(),
        artist,
    })
}

/// Trim and drop a surrounding quote character
fn clean_part(part: &str) -> String {
    let part = part.trim();
    let part = part.strip_prefix(['"', '\'']).unwrap_or(part);
    let part = part.strip_suffix(['"', '\'']).unwrap_or(part);
    part.trim().to_string()
}

/// Drop a trailing `->` or `>` segue marker
fn strip_segue(title: &str) -> &str {
    let stripped = title
        .strip_suffix("->")
        .or_else(|| title.strip_suffix('>'))
        .unwrap_or(title);
    stripped.trim()
}
