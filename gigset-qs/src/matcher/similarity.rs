//! Normalized edit-distance similarity

/// Similarity of two strings after lowercasing and trimming (0.0-1.0)
///
/// `(max_len - edit_distance) / max_len`; identical strings (including two
/// empty strings) score 1.0.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let a_normalized = a.trim().to_lowercase();
    let b_normalized = b.trim().to_lowercase();

    strsim::normalized_levenshtein(&a_normalized, &b_normalized)
}

/// Best similarity between `artist` and any of `candidates` (0.0 when empty)
pub fn best_artist_similarity<S: AsRef<str>>(artist: &str, candidates: &[S]) -> f64 {
    candidates
        .iter()
        .map(|name| calculate_similarity(artist, name.as_ref()))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        for s in ["a", "Wild Horses", "Dancin' in the Streets", "ß"] {
            assert_eq!(calculate_similarity(s, s), 1.0);
        }
        assert_eq!(calculate_similarity("", ""), 1.0);
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        assert_eq!(calculate_similarity("  Wild Horses ", "wild horses"), 1.0);
    }

    #[test]
    fn test_edit_distance_ratio() {
        // one substitution over four characters
        assert!((calculate_similarity("rose", "rosa") - 0.75).abs() < 1e-9);
        // one insertion over five characters
        assert!((calculate_similarity("rose", "roses") - 0.8).abs() < 1e-9);
        assert_eq!(calculate_similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_best_artist_similarity() {
        let names = vec!["The Band".to_string(), "Grateful Dead".to_string()];
        assert_eq!(best_artist_similarity("grateful dead", &names), 1.0);

        let none: Vec<String> = Vec::new();
        assert_eq!(best_artist_similarity("grateful dead", &none), 0.0);
    }
}
