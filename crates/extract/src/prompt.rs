/// Separator between the two segments of an NLI pair (RoBERTa convention).
pub const PAIR_SEPARATOR: &str = "</s></s>";

/// Encode `premise` and `hypothesis` as one classifier input.
pub fn build_entailment_pair(premise: &str, hypothesis: &str) -> String {
    format!("{} {} {}", premise, PAIR_SEPARATOR, hypothesis)
}
