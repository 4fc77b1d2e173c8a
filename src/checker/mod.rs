//! Convention checker - the core naming validation engine
//!
//! Architecture: Service Layer - One generic checker parameterized by entity kind
//! - Each convention variant is the same component with a different default pattern
//! - The compiled pattern is an immutable value swapped atomically on reconfiguration
//! - Checking is a pure query: entity in, optional violation out, no side effects

use crate::domain::violations::{
    EntityKind, NamedEntity, Severity, Violation, WardenError, WardenResult,
};
use crate::suggest;
use arc_swap::ArcSwap;
use regex::Regex;
use std::sync::Arc;

/// A compiled convention pattern: the user-facing source text plus the anchored regex
///
/// Immutable once built. Reconfiguration replaces the whole value rather than
/// mutating it, so concurrent checks always observe a consistent pattern.
#[derive(Debug)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile `source`, anchored at both ends for full-string matching
    ///
    /// The non-capturing group keeps alternations anchored as a whole, so `a|b`
    /// means exactly "a" or exactly "b", not "starts with a or ends with b".
    fn compile(source: &str) -> WardenResult<Self> {
        let anchored = format!("^(?:{source})$");
        let regex = Regex::new(&anchored)
            .map_err(|e| WardenError::invalid_pattern(source, e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Check that `pattern` compiles as a convention pattern, without activating it
///
/// Used by configuration validation to reject bad patterns before any checker
/// is built.
pub fn validate_pattern(pattern: &str) -> WardenResult<()> {
    CompiledPattern::compile(pattern).map(|_| ())
}

/// Validates declaration names against a configurable convention pattern
///
/// One instance exists per convention variant (class names, function names, ...),
/// all sharing this single implementation. `check` may be called concurrently from
/// any number of threads; `set_pattern` swaps the compiled pattern atomically, so
/// in-flight checks see either the old or the new pattern, never a torn update.
#[derive(Debug)]
pub struct ConventionChecker {
    kind: EntityKind,
    severity: Severity,
    active: ArcSwap<CompiledPattern>,
}

impl ConventionChecker {
    /// Create a checker for `kind` using its built-in default pattern
    pub fn new(kind: EntityKind) -> Self {
        Self::with_severity(kind, Severity::Warning)
    }

    /// Create a checker for `kind` with an explicit violation severity
    pub fn with_severity(kind: EntityKind, severity: Severity) -> Self {
        let compiled = CompiledPattern::compile(kind.default_pattern())
            .expect("built-in default patterns are valid regular expressions");

        Self {
            kind,
            severity,
            active: ArcSwap::from_pointee(compiled),
        }
    }

    /// Create a checker for `kind` with a configured pattern override
    pub fn with_pattern(kind: EntityKind, pattern: &str, severity: Severity) -> WardenResult<Self> {
        let checker = Self::with_severity(kind, severity);
        checker.set_pattern(pattern)?;
        Ok(checker)
    }

    /// The convention variant this checker validates
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The severity assigned to violations from this checker
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The currently active pattern text, exactly as configured
    pub fn pattern(&self) -> String {
        self.active.load().source.clone()
    }

    /// The built-in default pattern for this checker's kind
    pub fn default_pattern(&self) -> &'static str {
        self.kind.default_pattern()
    }

    /// Whether the active pattern is the built-in default
    pub fn is_default(&self) -> bool {
        self.active.load().source == self.kind.default_pattern()
    }

    /// Recompile the convention pattern from `pattern` and activate it
    ///
    /// Fails with `WardenError::InvalidPattern` if the string is not a valid
    /// regular expression; the previously active pattern stays in effect in that
    /// case. On success the compiled pattern is swapped in atomically.
    pub fn set_pattern(&self, pattern: &str) -> WardenResult<()> {
        let compiled = CompiledPattern::compile(pattern)?;

        tracing::debug!(
            kind = %self.kind,
            old = %self.active.load().source,
            new = %pattern,
            "activating convention pattern"
        );
        self.active.store(Arc::new(compiled));
        Ok(())
    }

    /// Restore the built-in default pattern
    pub fn reset(&self) {
        let compiled = CompiledPattern::compile(self.kind.default_pattern())
            .expect("built-in default patterns are valid regular expressions");
        self.active.store(Arc::new(compiled));
    }

    /// Check an entity's name against the active convention
    ///
    /// Returns `None` for conforming names and for entities that are not
    /// checkable: a missing display name means there is nothing to validate, and
    /// a missing identifier location means there is nowhere to attach a
    /// diagnostic. The match is full-string, so a conforming prefix is not enough.
    pub fn check(&self, entity: &NamedEntity) -> Option<Violation> {
        if entity.kind != self.kind {
            tracing::debug!(
                expected = %self.kind,
                got = %entity.kind,
                "entity kind does not match checker, skipping"
            );
            return None;
        }

        let name = entity.display_name.as_deref()?;
        if !entity.has_identifier_location {
            return None;
        }

        let compiled = self.active.load();
        if compiled.matches(name) {
            return None;
        }

        let mut violation = Violation::new(entity, name, &compiled.source, self.severity);
        if let Some(candidate) = suggest::conforming_name(self.kind, name, &compiled.regex) {
            violation = violation.with_suggestion(candidate);
        }

        Some(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;

    fn class_checker() -> ConventionChecker {
        ConventionChecker::new(EntityKind::Class)
    }

    #[test]
    fn test_all_default_patterns_compile() {
        for kind in EntityKind::all() {
            let checker = ConventionChecker::new(*kind);
            assert_eq!(checker.pattern(), kind.default_pattern());
            assert!(checker.is_default());
        }
    }

    #[test]
    fn test_conforming_name_passes() {
        let checker = class_checker();
        let entity = NamedEntity::new(EntityKind::Class, "Foo");
        assert!(checker.check(&entity).is_none());
    }

    #[test]
    fn test_lowercase_class_name_violates() {
        let checker = class_checker();
        let entity = NamedEntity::new(EntityKind::Class, "foo");

        let violation = checker.check(&entity).unwrap();
        assert_eq!(violation.pattern, "[A-Z][A-Za-z0-9]*");
        assert_eq!(
            violation.message,
            "Name \"foo\" does not match pattern '[A-Z][A-Za-z0-9]*'"
        );
    }

    #[test]
    fn test_underscore_not_in_character_class() {
        let checker = class_checker();
        let entity = NamedEntity::new(EntityKind::Class, "Foo_Bar");
        assert!(checker.check(&entity).is_some());
    }

    #[test]
    fn test_match_is_anchored_not_prefix() {
        let checker = class_checker();
        // A prefix of the name matches the pattern; the whole name must.
        let entity = NamedEntity::new(EntityKind::Class, "FooBar!");
        assert!(checker.check(&entity).is_some());
    }

    #[test]
    fn test_empty_name_violates_but_empty_match_allowed_by_pattern() {
        let checker = class_checker();
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, ""))
            .is_some());

        checker.set_pattern("[A-Za-z]*").unwrap();
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, ""))
            .is_none());
    }

    #[test]
    fn test_reconfigured_pattern_applies() {
        let checker = class_checker();
        checker.set_pattern("[0-9]+").unwrap();

        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "123"))
            .is_none());
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "Foo"))
            .is_some());
    }

    #[test]
    fn test_invalid_pattern_rejected_and_previous_kept() {
        let checker = class_checker();

        let err = checker.set_pattern("(unterminated").unwrap_err();
        assert!(matches!(err, WardenError::InvalidPattern { .. }));

        // The failed update never committed; the default still applies.
        assert_eq!(checker.pattern(), "[A-Z][A-Za-z0-9]*");
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "Foo"))
            .is_none());
    }

    #[test]
    fn test_pattern_round_trips_exactly() {
        let checker = class_checker();
        checker.set_pattern(r"[A-Z][a-z]+(Test)?").unwrap();
        assert_eq!(checker.pattern(), r"[A-Z][a-z]+(Test)?");
        assert!(!checker.is_default());

        checker.reset();
        assert!(checker.is_default());
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let checker = class_checker();
        checker.set_pattern("Foo|Bar").unwrap();

        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "Foo"))
            .is_none());
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "FooBar"))
            .is_some());
        assert!(checker
            .check(&NamedEntity::new(EntityKind::Class, "xBar"))
            .is_some());
    }

    #[test]
    fn test_unnamed_entity_skipped() {
        let checker = class_checker();
        assert!(checker.check(&NamedEntity::unnamed(EntityKind::Class)).is_none());
    }

    #[test]
    fn test_entity_without_identifier_location_skipped() {
        let checker = class_checker();
        let entity = NamedEntity::new(EntityKind::Class, "foo").without_identifier();
        assert!(checker.check(&entity).is_none());
    }

    #[test]
    fn test_mismatched_kind_skipped() {
        let checker = class_checker();
        let entity = NamedEntity::new(EntityKind::Function, "foo");
        assert!(checker.check(&entity).is_none());
    }

    #[test]
    fn test_violation_severity_follows_checker() {
        let checker = ConventionChecker::with_severity(EntityKind::Class, Severity::Error);
        let violation = checker
            .check(&NamedEntity::new(EntityKind::Class, "foo"))
            .unwrap();
        assert_eq!(violation.severity, Severity::Error);
        assert!(violation.is_blocking());
    }

    #[test]
    fn test_suggestion_matches_active_pattern() {
        let checker = class_checker();
        let violation = checker
            .check(&NamedEntity::new(EntityKind::Class, "foo_bar"))
            .unwrap();

        let suggestion = violation.suggested_rename.unwrap();
        assert_eq!(suggestion, "FooBar");
    }

    #[rstest]
    #[case(EntityKind::Function, "doWork", true)]
    #[case(EntityKind::Function, "DoWork", false)]
    #[case(EntityKind::Property, "counter", true)]
    #[case(EntityKind::Property, "Counter", false)]
    #[case(EntityKind::ConstProperty, "MAX_RETRIES", true)]
    #[case(EntityKind::ConstProperty, "maxRetries", false)]
    #[case(EntityKind::EnumEntry, "ACTIVE_STATE", true)]
    #[case(EntityKind::EnumEntry, "Active", true)]
    #[case(EntityKind::EnumEntry, "active", false)]
    #[case(EntityKind::Package, "org.example.util", true)]
    #[case(EntityKind::Package, "org.Example", false)]
    fn test_default_conventions(
        #[case] kind: EntityKind,
        #[case] name: &str,
        #[case] conforms: bool,
    ) {
        let checker = ConventionChecker::new(kind);
        let entity = NamedEntity::new(kind, name);
        assert_eq!(checker.check(&entity).is_none(), conforms);
    }

    #[test]
    fn test_concurrent_checks_during_pattern_swap() {
        let checker = Arc::new(class_checker());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let checker = Arc::clone(&checker);
            handles.push(std::thread::spawn(move || {
                for _ in 0..500 {
                    let violation =
                        checker.check(&NamedEntity::new(EntityKind::Class, "Name123"));
                    // "Name123" conforms to both patterns being swapped below,
                    // so every observed result must be clean regardless of timing.
                    assert!(violation.is_none());
                }
            }));
        }

        for i in 0..200 {
            let pattern = if i % 2 == 0 { "[A-Z][A-Za-z0-9]*" } else { "[A-Za-z0-9]+" };
            checker.set_pattern(pattern).unwrap();
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
