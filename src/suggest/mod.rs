//! Rename-candidate derivation for convention violations
//!
//! Architecture: Domain Service - Suggestions are advisory, the host performs renames
//! - Candidates are derived by case conversion appropriate to the entity kind
//! - A candidate is only offered if it fully matches the active pattern, so the
//!   host's rename quick-fix never proposes a name that would itself be flagged

use crate::domain::violations::EntityKind;
use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use regex::Regex;

/// Derive a conforming replacement for `name`, if case conversion can produce one
///
/// `pattern` is the active anchored regex; candidates that don't fully match it
/// (custom patterns may reject conventional casing too) are discarded, as is a
/// candidate identical to the original name.
pub fn conforming_name(kind: EntityKind, name: &str, pattern: &Regex) -> Option<String> {
    candidates(kind, name)
        .into_iter()
        .find(|candidate| candidate != name && !candidate.is_empty() && pattern.is_match(candidate))
}

/// Case-conversion candidates for `name`, in preference order for `kind`
fn candidates(kind: EntityKind, name: &str) -> Vec<String> {
    match kind {
        EntityKind::Class => vec![name.to_upper_camel_case()],
        EntityKind::EnumEntry => vec![name.to_upper_camel_case(), name.to_shouty_snake_case()],
        EntityKind::Function | EntityKind::Property => vec![name.to_lower_camel_case()],
        EntityKind::ConstProperty => vec![name.to_shouty_snake_case()],
        EntityKind::Package => vec![name
            .split('.')
            .map(|segment| segment.to_lower_camel_case())
            .collect::<Vec<_>>()
            .join(".")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored(pattern: &str) -> Regex {
        Regex::new(&format!("^(?:{pattern})$")).unwrap()
    }

    #[test]
    fn test_class_suggestion_upper_camel() {
        let pattern = anchored(EntityKind::Class.default_pattern());
        assert_eq!(
            conforming_name(EntityKind::Class, "foo_bar", &pattern),
            Some("FooBar".to_string())
        );
        assert_eq!(
            conforming_name(EntityKind::Class, "myHandler", &pattern),
            Some("MyHandler".to_string())
        );
    }

    #[test]
    fn test_function_suggestion_lower_camel() {
        let pattern = anchored(EntityKind::Function.default_pattern());
        assert_eq!(
            conforming_name(EntityKind::Function, "Do_Work", &pattern),
            Some("doWork".to_string())
        );
    }

    #[test]
    fn test_const_suggestion_shouty_snake() {
        let pattern = anchored(EntityKind::ConstProperty.default_pattern());
        assert_eq!(
            conforming_name(EntityKind::ConstProperty, "maxRetries", &pattern),
            Some("MAX_RETRIES".to_string())
        );
    }

    #[test]
    fn test_package_segments_converted_independently() {
        let pattern = anchored(EntityKind::Package.default_pattern());
        assert_eq!(
            conforming_name(EntityKind::Package, "org.Example.my_util", &pattern),
            Some("org.example.myUtil".to_string())
        );
    }

    #[test]
    fn test_candidate_rejected_by_custom_pattern() {
        // A pattern the cased candidate cannot satisfy yields no suggestion.
        let pattern = anchored("[0-9]+");
        assert_eq!(conforming_name(EntityKind::Class, "foo", &pattern), None);
    }

    #[test]
    fn test_punctuation_stripped_and_empty_never_offered() {
        // "Weird!" fails the default pattern but camel-casing strips the '!',
        // producing a valid, different candidate.
        let pattern = anchored(EntityKind::Class.default_pattern());
        assert_eq!(
            conforming_name(EntityKind::Class, "Weird!", &pattern),
            Some("Weird".to_string())
        );
        // An empty name produces an empty candidate, which is never offered.
        assert_eq!(conforming_name(EntityKind::Class, "", &pattern), None);
    }
}
