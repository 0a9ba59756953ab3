//! Significant-word extraction and overlap

/// Words ignored when comparing titles
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "in", "on", "at", "to", "for", "of", "with", "and", "or", "but", "my",
    "your", "his", "her", "its", "our", "their",
];

/// Lowercased words longer than two characters, punctuation removed and
/// stop-words dropped, without duplicates
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

/// Identical, or one contains the other ("rose" / "roses")
pub fn keywords_equivalent(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

/// Input keywords that have an equivalent among `candidate` keywords
pub fn keyword_intersection(input: &[String], candidate: &[String]) -> Vec<String> {
    input
        .iter()
        .filter(|word| candidate.iter().any(|other| keywords_equivalent(word, other)))
        .cloned()
        .collect()
}
