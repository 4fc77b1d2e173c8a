//! Inspection orchestrator for Name Warden
//!
//! Architecture: Domain Services - The inspector coordinates checkers over an entity stream
//! - The host supplies entities through `EntitySource`; discovery stays on the host side
//! - Violations flow out through `DiagnosticSink`; surfacing them stays on the host side
//! - One checker per enabled convention kind, built once from validated configuration

use crate::checker::ConventionChecker;
use crate::config::WardenConfig;
use crate::domain::violations::{
    EntityKind, InspectionReport, NamedEntity, Violation, WardenResult,
};
use std::collections::HashMap;
use std::time::Instant;

/// Inbound collaborator contract: a stream of declarations to check
///
/// Implemented for any iterator of entities, so hosts and tests can feed the
/// inspector from whatever traversal they already have. Ordering is the host's
/// responsibility.
pub trait EntitySource {
    fn next_entity(&mut self) -> Option<NamedEntity>;
}

impl<I> EntitySource for I
where
    I: Iterator<Item = NamedEntity>,
{
    fn next_entity(&mut self) -> Option<NamedEntity> {
        self.next()
    }
}

/// Outbound collaborator contract: where violations are surfaced
///
/// The inspector hands over each violation as it is produced; the sink decides
/// how to display it and whether to offer the rename action. The checker itself
/// never performs a rename.
pub trait DiagnosticSink {
    fn report(&mut self, violation: Violation);
}

/// A sink that collects violations into an [`InspectionReport`]
#[derive(Debug, Default)]
pub struct ReportSink {
    report: InspectionReport,
}

impl ReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the sink, returning the accumulated report
    pub fn into_report(self) -> InspectionReport {
        self.report
    }
}

impl DiagnosticSink for ReportSink {
    fn report(&mut self, violation: Violation) {
        self.report.add_violation(violation);
    }
}

/// Statistics about the configured conventions
#[derive(Debug, Default)]
pub struct ConventionStats {
    pub enabled_kinds: usize,
    pub disabled_kinds: usize,
    pub overridden_patterns: usize,
}

impl ConventionStats {
    pub fn total_kinds(&self) -> usize {
        self.enabled_kinds + self.disabled_kinds
    }
}

/// Dispatches entities to per-kind convention checkers
///
/// Built once from a validated configuration; all pattern compilation happens
/// here, so inspection itself has no error path.
pub struct NameInspector {
    config: WardenConfig,
    checkers: HashMap<EntityKind, ConventionChecker>,
}

impl NameInspector {
    /// Create an inspector with one checker per enabled convention kind
    pub fn new(config: WardenConfig) -> WardenResult<Self> {
        config.validate()?;

        let mut checkers = HashMap::new();
        for kind in config.enabled_kinds() {
            let checker = ConventionChecker::with_pattern(
                kind,
                config.effective_pattern(kind),
                config.effective_severity(kind),
            )?;
            tracing::debug!(
                kind = %kind,
                pattern = %checker.pattern(),
                severity = %checker.severity().as_str(),
                "registered convention checker"
            );
            checkers.insert(kind, checker);
        }

        Ok(Self { config, checkers })
    }

    /// Create an inspector enforcing the built-in defaults for every kind
    pub fn with_defaults() -> WardenResult<Self> {
        Self::new(WardenConfig::default())
    }

    /// The checker for a kind, if that kind's convention is enabled
    pub fn checker(&self, kind: EntityKind) -> Option<&ConventionChecker> {
        self.checkers.get(&kind)
    }

    /// Check a single entity against its kind's convention
    ///
    /// Returns `None` for conforming names, unchecked entities, and entities of
    /// disabled kinds.
    pub fn check_entity(&self, entity: &NamedEntity) -> Option<Violation> {
        self.checkers.get(&entity.kind)?.check(entity)
    }

    /// Drain an entity source, forwarding violations to `sink`
    ///
    /// Returns `(total, skipped)` entity counts. An entity counts as skipped when
    /// it is not checkable (no name or no identifier location) or its kind's
    /// convention is disabled.
    pub fn inspect<S, D>(&self, mut source: S, sink: &mut D) -> (usize, usize)
    where
        S: EntitySource,
        D: DiagnosticSink,
    {
        let mut total = 0;
        let mut skipped = 0;

        while let Some(entity) = source.next_entity() {
            total += 1;

            if !entity.is_checkable() || !self.checkers.contains_key(&entity.kind) {
                skipped += 1;
                continue;
            }

            if let Some(violation) = self.check_entity(&entity) {
                sink.report(violation);
            }
        }

        (total, skipped)
    }

    /// Run a full inspection over an entity source, producing a stamped report
    pub fn run<S: EntitySource>(&self, source: S) -> InspectionReport {
        let start_time = Instant::now();
        let mut sink = ReportSink::new();

        let (total, skipped) = self.inspect(source, &mut sink);

        let mut report = sink.into_report();
        report.set_entities_checked(total, skipped);
        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        report.set_config_fingerprint(self.config.fingerprint());
        report.sort_violations();

        tracing::debug!(
            total,
            skipped,
            violations = report.violations.len(),
            "inspection run complete"
        );

        report
    }

    /// Get configuration fingerprint for report stamping
    pub fn config_fingerprint(&self) -> String {
        self.config.fingerprint()
    }

    /// Get statistics about the configured conventions
    pub fn stats(&self) -> ConventionStats {
        let mut stats = ConventionStats::default();

        for kind in EntityKind::all() {
            if let Some(checker) = self.checkers.get(kind) {
                stats.enabled_kinds += 1;
                if !checker.is_default() {
                    stats.overridden_patterns += 1;
                }
            } else {
                stats.disabled_kinds += 1;
            }
        }

        stats
    }
}
