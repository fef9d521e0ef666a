use serde::Serialize;

use crate::truncator::BoundKind;

/// A prefix of the request text, cut to one of the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt<'a> {
    pub kind: BoundKind,
    pub text: &'a str,
    /// Length of `text` in characters, not bytes.
    pub chars: usize,
    pub truncated: bool,
}

impl<'a> Excerpt<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Rough token estimate (1.3 tokens per word), used only for logging.
    pub fn estimated_tokens(&self) -> usize {
        let word_count = self.text.split_whitespace().count();
        (word_count as f64 * 1.3) as usize
    }
}
