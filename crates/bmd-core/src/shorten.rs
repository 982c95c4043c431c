//! Shortens free-text names to a fixed number of words.

/// Joins at most `max_words` whitespace-delimited words of `text` with
/// underscores.
///
/// When `text` has at least `max_words` words, only the first
/// `max_words` are kept; otherwise all words are joined. `max_words == 0`
/// is treated as "no truncation".
pub fn shorten(max_words: usize, text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if max_words > 0 && words.len() >= max_words {
        words[..max_words].join("_")
    } else {
        words.join("_")
    }
}
