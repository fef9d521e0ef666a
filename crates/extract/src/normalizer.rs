use regex::Regex;
use std::sync::LazyLock;

use crate::schema::EntityCategory;

static TAG_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[BIESL]-").expect("tag prefix pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Map a recognizer's label onto an entity category.
///
/// Handles BIO/BIOES tagged labels (`B-PER`) as well as spaCy-style
/// names (`PERSON`, `GPE`).
pub fn normalize_category(label: &str) -> EntityCategory {
    let upper = label.trim().to_ascii_uppercase();
    let bare = TAG_PREFIX.replace(&upper, "");

    match bare.as_ref() {
        "PER" | "PERSON" => EntityCategory::Person,
        "ORG" | "ORGANIZATION" | "ORGANISATION" => EntityCategory::Organization,
        "LOC" | "LOCATION" | "GPE" => EntityCategory::Location,
        other => EntityCategory::Other(other.to_string()),
    }
}

/// Trim and collapse internal whitespace so "Acme\n Corp" keys as "Acme Corp".
pub fn normalize_surface(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_normalization() {
        assert_eq!(normalize_category("PER"), EntityCategory::Person);
        assert_eq!(normalize_category("B-PER"), EntityCategory::Person);
        assert_eq!(normalize_category("I-org"), EntityCategory::Organization);
        assert_eq!(normalize_category("GPE"), EntityCategory::Location);
        assert_eq!(normalize_category(" LOC "), EntityCategory::Location);
        assert_eq!(
            normalize_category("MISC"),
            EntityCategory::Other("MISC".to_string())
        );
        assert_eq!(
            normalize_category("DATE"),
            EntityCategory::Other("DATE".to_string())
        );
    }

    #[test]
    fn test_surface_normalization() {
        assert_eq!(normalize_surface("  Acme  "), "Acme");
        assert_eq!(normalize_surface("Acme\n  Corp"), "Acme Corp");
    }
}
