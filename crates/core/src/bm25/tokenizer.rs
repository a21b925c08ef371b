//! Tokenizer with stop word removal.
//!
//! Lowercases, splits on non-alphanumeric characters, and removes common
//! English stop words. Single-character tokens are discarded. Tokens are byte
//! spans into one lowercased buffer.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "if", "in", "into",
        "is", "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then",
        "there", "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Tokenized text: owns the lowercased buffer, provides &str slices via byte spans.
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>,
}

impl Tokens {
    /// Returns an iterator over the token `&str` slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

fn keep(token: &str) -> bool {
    token.chars().nth(1).is_some() && !STOP_WORDS.contains(token)
}

/// Tokenize text: lowercase, split on non-alphanumeric, remove stop words.
pub fn tokenize(text: &str) -> Tokens {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in buffer.char_indices() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            if keep(&buffer[s..i]) {
                spans.push((s as u32, i as u32));
            }
            start = None;
        }
    }
    if let Some(s) = start {
        if keep(&buffer[s..]) {
            spans.push((s as u32, buffer.len() as u32));
        }
    }

    Tokens { buffer, spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("Senior React/TypeScript dev (London, UK)");
        let words: Vec<&str> = tokens.iter().collect();
        assert_eq!(words, vec!["senior", "react", "typescript", "dev", "london", "uk"]);
        assert_eq!(tokens.len(), 6);
        assert!(tokenize("the of and").is_empty());
    }

    #[test]
    fn test_tokenize_drops_single_chars_and_markers() {
        let tokens = tokenize("c developer in london at acme");
        let words: Vec<&str> = tokens.iter().collect();
        assert_eq!(words, vec!["developer", "london", "acme"]);
    }

    #[test]
    fn test_tokenize_multibyte_single_char() {
        // One non-ASCII character is still a single-character token.
        let tokens = tokenize("é café");
        let words: Vec<&str> = tokens.iter().collect();
        assert_eq!(words, vec!["café"]);
    }
}
