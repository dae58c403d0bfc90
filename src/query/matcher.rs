//! Fuzzy subsequence matching.
//!
//! A needle matches a haystack when every needle character occurs in the
//! haystack in order, gaps allowed. Comparison is case-insensitive, folding
//! one character at a time.

/// Fold a single character for comparison.
///
/// Characters whose lowercase form expands to several characters (e.g. `İ`)
/// fold to the first of them, keeping the comparison strictly one character
/// against one character.
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        c.to_ascii_lowercase()
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}

/// Fold a whole string character by character.
///
/// Unlike [`str::to_lowercase`] this ignores context, so a word-final `Σ`
/// folds to `σ` exactly as it does inside a needle.
pub fn fold_str(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// True iff every character of `needle` appears in `haystack` in order.
///
/// An empty needle matches everything; an empty haystack matches only the
/// empty needle. Single forward pass over both strings.
pub fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut wanted = needle.chars().map(fold_char).peekable();

    for c in haystack.chars() {
        match wanted.peek() {
            None => return true,
            Some(&w) if w == fold_char(c) => {
                wanted.next();
            }
            Some(_) => {}
        }
    }

    wanted.peek().is_none()
}

/// Char positions in `haystack` consumed by a greedy match of `needle`, or
/// `None` when it does not match. Used to highlight hits.
pub fn match_positions(haystack: &str, needle: &str) -> Option<Vec<usize>> {
    let wanted: Vec<char> = needle.chars().map(fold_char).collect();
    let mut positions = Vec::with_capacity(wanted.len());

    for (pos, c) in haystack.chars().enumerate() {
        if positions.len() == wanted.len() {
            break;
        }
        if wanted[positions.len()] == fold_char(c) {
            positions.push(pos);
        }
    }

    (positions.len() == wanted.len()).then_some(positions)
}

/// A needle folded once and reused across many candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern {
    folded: Vec<char>,
}

impl FuzzyPattern {
    pub fn new(needle: &str) -> Self {
        Self {
            folded: needle.chars().map(fold_char).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Same semantics as [`is_subsequence`] with this pattern as the needle
    pub fn matches(&self, haystack: &str) -> bool {
        let mut pos = 0;
        for c in haystack.chars() {
            if pos == self.folded.len() {
                break;
            }
            if self.folded[pos] == fold_char(c) {
                pos += 1;
            }
        }
        pos == self.folded.len()
    }
}
