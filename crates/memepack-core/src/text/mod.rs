//! Keyword extraction from filename stems and pack keys

use std::collections::HashSet;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '_' | '-' | '.')
}

/// Split on runs of whitespace, `_`, `-` or `.` into lowercase tokens.
///
/// Empty tokens are dropped and duplicates removed, keeping the first
/// occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    push_unique(
        &mut tokens,
        text.to_lowercase()
            .split(is_separator)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    );
    tokens
}

/// Keywords for one item: stem tokens first, then pack key tokens
pub fn item_keywords(stem: &str, pack_key: &str) -> Vec<String> {
    let mut keywords = tokenize(stem);
    push_unique(&mut keywords, tokenize(pack_key));
    keywords
}

/// Append values not already present, preserving order
pub fn push_unique(target: &mut Vec<String>, values: impl IntoIterator<Item = String>) {
    let mut seen: HashSet<String> = target.iter().cloned().collect();
    for value in values {
        if seen.insert(value.clone()) {
            target.push(value);
        }
    }
}
