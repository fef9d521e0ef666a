use serde::{Deserialize, Serialize};

use crate::excerpt::Excerpt;

/// Which downstream consumer an excerpt is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    Summarization,
    Verification,
    Graph,
}

/// Character bounds for the three excerpts taken from one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub summarization: usize,
    pub verification: usize,
    pub graph: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            summarization: 1024,
            verification: 768,
            graph: 4096,
        }
    }
}

impl Bounds {
    pub fn get(&self, kind: BoundKind) -> usize {
        match kind {
            BoundKind::Summarization => self.summarization,
            BoundKind::Verification => self.verification,
            BoundKind::Graph => self.graph,
        }
    }

    pub fn excerpt<'a>(&self, text: &'a str, kind: BoundKind) -> Excerpt<'a> {
        let bound = self.get(kind);
        let cut = truncate(text, bound);
        let chars = cut.chars().count();

        let excerpt = Excerpt {
            kind,
            text: cut,
            chars,
            truncated: cut.len() < text.len(),
        };

        if excerpt.truncated {
            tracing::debug!(
                kind = ?kind,
                bound,
                kept_chars = chars,
                "Input truncated"
            );
        }

        excerpt
    }
}

/// Leading `min(chars(text), bound)` characters of `text`.
///
/// Counts Unicode scalar values, so the cut never splits a UTF-8 sequence,
/// but it will happily split a word or a sentence.
pub fn truncate(text: &str, bound: usize) -> &str {
    match text.char_indices().nth(bound) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
