use unicode_segmentation::UnicodeSegmentation;

use crate::schema::SentenceSpan;

/// Lowercased abbreviations that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "inc", "ltd", "co", "corp", "mt", "gen",
    "gov", "sen", "rep", "vs",
];

/// Split `text` into sentences using UAX #29 sentence boundaries.
///
/// A boundary right after an abbreviation ("Mr.") or an initial ("J.",
/// "U.S.") is not a sentence end, so those segments are joined with the
/// next one. Spans are in characters and tile the text: a span covers its
/// sentence plus trailing whitespace. Whitespace-only segments are dropped.
pub fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut start = 0;
    let mut cursor = 0;

    for segment in text.split_sentence_bounds() {
        buffer.push_str(segment);
        cursor += segment.chars().count();

        if ends_with_abbreviation(segment) {
            continue;
        }

        flush(&mut spans, &mut buffer, start, cursor);
        start = cursor;
    }

    flush(&mut spans, &mut buffer, start, cursor);
    spans
}

fn flush(spans: &mut Vec<SentenceSpan>, buffer: &mut String, start: usize, end: usize) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        spans.push(SentenceSpan {
            text: trimmed.to_string(),
            start,
            end,
        });
    }
    buffer.clear();
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(body) = segment.trim_end().strip_suffix('.') else {
        return false;
    };
    let Some(last) = body.split_whitespace().last() else {
        return false;
    };
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    if last.is_empty() {
        return false;
    }

    let is_initialism = last.split('.').all(|part| {
        let mut chars = part.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
    });

    is_initialism || ABBREVIATIONS.contains(&last.to_lowercase().as_str())
}

/// Index of the span containing character `offset`.
pub fn sentence_index(spans: &[SentenceSpan], offset: usize) -> Option<usize> {
    let idx = spans.partition_point(|s| s.end <= offset);
    spans.get(idx).filter(|s| s.contains(offset)).map(|_| idx)
}
