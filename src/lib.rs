//! Name Warden - naming-convention validation for declaration identifiers
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from infrastructure concerns
//! - Clean boundaries between the checking core and host-supplied collaborators
//! - The host feeds entities in and surfaces violations out; conventions are
//!   configured as regular expressions that names must match in full

pub mod checker;
pub mod config;
pub mod domain;
pub mod inspect;
pub mod report;
pub mod suggest;

// Re-export main types for convenient access
pub use domain::violations::{
    EntityKind, InspectionReport, InspectionSummary, NamedEntity, Severity, Violation,
    ViolationCounts, WardenError, WardenResult,
};

pub use checker::{validate_pattern, ConventionChecker};

pub use config::{ConfigBuilder, ConventionRule, WardenConfig};

pub use inspect::{ConventionStats, DiagnosticSink, EntitySource, NameInspector, ReportSink};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

use std::path::Path;

/// Main warden facade providing high-level naming-convention operations
///
/// Wraps a [`NameInspector`] and a [`ReportFormatter`]; hosts that need finer
/// control (custom sinks, per-checker access) can use those directly.
pub struct NameWarden {
    inspector: NameInspector,
    report_formatter: ReportFormatter,
}

impl NameWarden {
    /// Create a warden with the given configuration
    pub fn new_with_config(config: WardenConfig) -> WardenResult<Self> {
        let inspector = NameInspector::new(config)?;

        Ok(Self {
            inspector,
            report_formatter: ReportFormatter::default(),
        })
    }

    /// Create a warden with default conventions
    pub fn new() -> WardenResult<Self> {
        Self::new_with_config(WardenConfig::default())
    }

    /// Create a warden loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> WardenResult<Self> {
        let config = WardenConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// Check a single entity against its kind's convention
    pub fn check_entity(&self, entity: &NamedEntity) -> Option<Violation> {
        self.inspector.check_entity(entity)
    }

    /// Check a batch of entities, producing a stamped report
    pub fn check_entities<I>(&self, entities: I) -> InspectionReport
    where
        I: IntoIterator<Item = NamedEntity>,
    {
        self.inspector.run(entities.into_iter())
    }

    /// The active pattern for a kind, if its convention is enabled
    ///
    /// This is the configuration read surface: the returned text is exactly what
    /// was last accepted by [`set_pattern`](Self::set_pattern) or configured at
    /// construction, suitable for display and round-tripping into storage.
    pub fn pattern(&self, kind: EntityKind) -> Option<String> {
        self.inspector.checker(kind).map(|c| c.pattern())
    }

    /// Reconfigure the pattern for a kind at runtime
    ///
    /// Fails with `InvalidPattern` for a malformed regular expression, leaving
    /// the previous pattern active, or with a configuration error if the kind's
    /// convention is disabled.
    pub fn set_pattern(&self, kind: EntityKind, pattern: &str) -> WardenResult<()> {
        let checker = self.inspector.checker(kind).ok_or_else(|| {
            WardenError::config(format!("Convention for '{kind}' is disabled"))
        })?;
        checker.set_pattern(pattern)
    }

    /// Format an inspection report for output
    pub fn format_report(
        &self,
        report: &InspectionReport,
        format: OutputFormat,
    ) -> WardenResult<String> {
        self.report_formatter.format_report(report, format)
    }

    /// Get statistics about the configured conventions
    pub fn convention_statistics(&self) -> ConventionStats {
        self.inspector.stats()
    }

    /// Access the underlying inspector
    pub fn inspector(&self) -> &NameInspector {
        &self.inspector
    }
}

/// Convenience function to create a warden with default conventions
pub fn create_warden() -> WardenResult<NameWarden> {
    NameWarden::new()
}

/// Convenience function to check a batch of names of one kind against defaults
pub fn check_names<S>(kind: EntityKind, names: &[S]) -> WardenResult<InspectionReport>
where
    S: AsRef<str>,
{
    let warden = NameWarden::new()?;
    Ok(warden.check_entities(
        names
            .iter()
            .map(|name| NamedEntity::new(kind, name.as_ref()))
            .collect::<Vec<_>>(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warden_creation() {
        let warden = NameWarden::new().unwrap();
        let stats = warden.convention_statistics();

        assert_eq!(stats.enabled_kinds, EntityKind::all().len());
        assert_eq!(stats.overridden_patterns, 0);
    }

    #[test]
    fn test_check_entities_end_to_end() {
        let warden = NameWarden::new().unwrap();

        let report = warden.check_entities(vec![
            NamedEntity::new(EntityKind::Class, "WellFormed"),
            NamedEntity::new(EntityKind::Class, "ill_formed"),
        ]);

        assert_eq!(report.summary.total_entities, 2);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].name, "ill_formed");
        assert_eq!(
            report.violations[0].suggested_rename.as_deref(),
            Some("IllFormed")
        );
    }

    #[test]
    fn test_pattern_surface_round_trip() {
        let warden = NameWarden::new().unwrap();

        assert_eq!(
            warden.pattern(EntityKind::Class).as_deref(),
            Some("[A-Z][A-Za-z0-9]*")
        );

        warden.set_pattern(EntityKind::Class, "[0-9]+").unwrap();
        assert_eq!(warden.pattern(EntityKind::Class).as_deref(), Some("[0-9]+"));

        let entity = NamedEntity::new(EntityKind::Class, "123");
        assert!(warden.check_entity(&entity).is_none());
    }

    #[test]
    fn test_set_pattern_rejects_invalid_and_keeps_previous() {
        let warden = NameWarden::new().unwrap();

        let err = warden
            .set_pattern(EntityKind::Class, "(unterminated")
            .unwrap_err();
        assert!(matches!(err, WardenError::InvalidPattern { .. }));

        assert_eq!(
            warden.pattern(EntityKind::Class).as_deref(),
            Some("[A-Z][A-Za-z0-9]*")
        );
        assert!(warden
            .check_entity(&NamedEntity::new(EntityKind::Class, "Foo"))
            .is_none());
    }

    #[test]
    fn test_set_pattern_on_disabled_kind_is_config_error() {
        let config = ConfigBuilder::new().disable(EntityKind::Package).build().unwrap();
        let warden = NameWarden::new_with_config(config).unwrap();

        assert!(warden.pattern(EntityKind::Package).is_none());
        let err = warden.set_pattern(EntityKind::Package, "[a-z]+").unwrap_err();
        assert!(matches!(err, WardenError::Configuration { .. }));
    }

    #[test]
    fn test_report_formatting_through_facade() {
        let warden = NameWarden::new().unwrap();
        let report = warden.check_entities(vec![NamedEntity::new(EntityKind::Class, "nope")]);

        let human = warden.format_report(&report, OutputFormat::Human).unwrap();
        assert!(human.contains("Naming Convention Violations Found"));

        let json = warden.format_report(&report, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["violations"].is_array());
    }

    #[test]
    fn test_check_names_convenience() {
        let report = check_names(EntityKind::Function, &["good", "AlsoBad", "fine"]).unwrap();
        assert_eq!(report.summary.total_entities, 3);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].name, "AlsoBad");
    }
}
