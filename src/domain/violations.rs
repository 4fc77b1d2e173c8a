//! Core domain models for naming-convention violations
//!
//! Architecture: Rich Domain Models - Violations are entities with behavior, not just data
//! - Entities describe what the host discovered; violations describe what failed
//! - InspectionReport acts as an aggregate root managing collections of violations
//! - The report is produced per inspection run and consumed by formatters at the boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity levels for naming-convention violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages and suggestions
    Info,
    /// Warnings that should be addressed but don't block builds
    Warning,
    /// Errors that block commits and fail CI/CD builds
    Error,
}

impl Severity {
    /// Whether this severity level should cause an inspection run to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// The kind of declaration a naming convention applies to
///
/// Each kind carries its own default pattern; every kind is validated by the same
/// generic checker, parameterized by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Class or object declarations
    Class,
    /// Enum entry declarations
    EnumEntry,
    /// Function declarations
    Function,
    /// Mutable property / variable declarations
    Property,
    /// Compile-time constant declarations
    ConstProperty,
    /// Package / namespace declarations
    Package,
}

impl EntityKind {
    /// The built-in convention pattern for this kind
    pub fn default_pattern(self) -> &'static str {
        match self {
            Self::Class => "[A-Z][A-Za-z0-9]*",
            Self::EnumEntry => "[A-Z]([A-Za-z0-9]*|[A-Z_0-9]*)",
            Self::Function => "[a-z][A-Za-z0-9]*",
            Self::Property => "[a-z][A-Za-z0-9]*",
            Self::ConstProperty => "[A-Z][_A-Z0-9]*",
            Self::Package => r"[a-z][A-Za-z0-9]*(\.[a-z][A-Za-z0-9]*)*",
        }
    }

    /// Stable identifier used in configuration files and CLI arguments
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::EnumEntry => "enum_entry",
            Self::Function => "function",
            Self::Property => "property",
            Self::ConstProperty => "const_property",
            Self::Package => "package",
        }
    }

    /// Human-readable label for diagnostic messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::EnumEntry => "Enum entry",
            Self::Function => "Function",
            Self::Property => "Property",
            Self::ConstProperty => "Const property",
            Self::Package => "Package",
        }
    }

    /// All convention kinds, in stable order
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Class,
            Self::EnumEntry,
            Self::Function,
            Self::Property,
            Self::ConstProperty,
            Self::Package,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WardenError::config(format!("Unknown entity kind: '{s}'")))
    }
}

/// A named declaration supplied by the host for convention checking
///
/// The host is responsible for discovery and ordering; the checker only sees what
/// arrives here. Entities without a display name or without an identifier location
/// are skipped, never reported - there is either nothing to validate or nowhere to
/// attach the diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Which convention this entity is checked against
    pub kind: EntityKind,
    /// The declared identifier, if the declaration has one
    pub display_name: Option<String>,
    /// Whether the host can point at an identifier token in source
    pub has_identifier_location: bool,
    /// Source file containing the declaration, if known
    pub file_path: Option<PathBuf>,
    /// Line number (1-indexed) of the identifier, if known
    pub line_number: Option<u32>,
    /// Column number (1-indexed) of the identifier, if known
    pub column_number: Option<u32>,
}

impl NamedEntity {
    /// Create a named entity with an identifier location
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            display_name: Some(name.into()),
            has_identifier_location: true,
            file_path: None,
            line_number: None,
            column_number: None,
        }
    }

    /// Create an entity whose declaration carries no name (e.g. an anonymous object)
    pub fn unnamed(kind: EntityKind) -> Self {
        Self {
            kind,
            display_name: None,
            has_identifier_location: false,
            file_path: None,
            line_number: None,
            column_number: None,
        }
    }

    /// Mark the entity as having no identifier token to attach a diagnostic to
    pub fn without_identifier(mut self) -> Self {
        self.has_identifier_location = false;
        self
    }

    /// Attach the source position of the identifier
    pub fn with_location(mut self, file_path: PathBuf, line: u32, column: u32) -> Self {
        self.file_path = Some(file_path);
        self.line_number = Some(line);
        self.column_number = Some(column);
        self
    }

    /// Whether this entity is eligible for checking at all
    pub fn is_checkable(&self) -> bool {
        self.display_name.is_some() && self.has_identifier_location
    }
}

/// A naming-convention violation produced by a failed check
///
/// Violations are created per check call and consumed immediately by the host's
/// diagnostic sink; they are never persisted by the checker itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// The kind of declaration that violated its convention
    pub kind: EntityKind,
    /// The offending identifier
    pub name: String,
    /// The pattern text the name failed to match
    pub pattern: String,
    /// Severity level of this violation
    pub severity: Severity,
    /// Human-readable description of the violation
    pub message: String,
    /// Source file where the violation was found, if known
    pub file_path: Option<PathBuf>,
    /// Line number (1-indexed) where the violation occurs
    pub line_number: Option<u32>,
    /// Column number (1-indexed) where the violation starts
    pub column_number: Option<u32>,
    /// A conforming replacement name, when one can be derived
    pub suggested_rename: Option<String>,
    /// When this violation was detected
    pub detected_at: DateTime<Utc>,
}

impl Violation {
    /// Create a violation for an entity whose name failed to match `pattern`
    ///
    /// The message follows a fixed template so hosts can rely on its shape.
    pub fn new(
        entity: &NamedEntity,
        name: &str,
        pattern: impl Into<String>,
        severity: Severity,
    ) -> Self {
        let pattern = pattern.into();
        Self {
            kind: entity.kind,
            name: name.to_string(),
            message: format!("Name \"{name}\" does not match pattern '{pattern}'"),
            pattern,
            severity,
            file_path: entity.file_path.clone(),
            line_number: entity.line_number,
            column_number: entity.column_number,
            suggested_rename: None,
            detected_at: Utc::now(),
        }
    }

    /// Add a conforming rename candidate
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggested_rename = Some(suggestion.into());
        self
    }

    /// Whether this violation is blocking (prevents commits/builds)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        let location = match (&self.file_path, self.line_number, self.column_number) {
            (Some(path), Some(line), Some(col)) => format!("{}:{line}:{col} ", path.display()),
            (Some(path), Some(line), None) => format!("{}:{line} ", path.display()),
            (Some(path), None, _) => format!("{} ", path.display()),
            _ => String::new(),
        };

        format!(
            "{}[{}] {}: {}",
            location,
            self.severity.as_str(),
            self.kind.label(),
            self.message
        )
    }
}

/// Count of violations by severity level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl ViolationCounts {
    /// Total number of violations across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }

    /// Whether there are any blocking violations
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a violation to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Summary statistics for an inspection run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectionSummary {
    /// Total number of entities the host supplied
    pub total_entities: usize,
    /// Entities skipped because they had no name or no identifier location
    pub skipped_entities: usize,
    /// Number of violations by severity level
    pub violations_by_severity: ViolationCounts,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when the inspection was performed
    pub inspected_at: DateTime<Utc>,
}

/// Complete inspection report containing all violations and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// All violations found during the run
    pub violations: Vec<Violation>,
    /// Summary statistics
    pub summary: InspectionSummary,
    /// Configuration used for this run
    pub config_fingerprint: Option<String>,
}

impl InspectionReport {
    /// Create a new empty inspection report
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            summary: InspectionSummary {
                inspected_at: Utc::now(),
                ..Default::default()
            },
            config_fingerprint: None,
        }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.violations_by_severity.add(violation.severity);
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Whether the report contains blocking violations (errors)
    pub fn has_errors(&self) -> bool {
        self.summary.violations_by_severity.has_blocking()
    }

    /// Get violations of a specific severity
    pub fn violations_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.severity == severity)
    }

    /// Set the entity totals for the run
    pub fn set_entities_checked(&mut self, total: usize, skipped: usize) {
        self.summary.total_entities = total;
        self.summary.skipped_entities = skipped;
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Set the configuration fingerprint
    pub fn set_config_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.config_fingerprint = Some(fingerprint.into());
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: InspectionReport) {
        for violation in other.violations {
            self.add_violation(violation);
        }
        self.summary.total_entities += other.summary.total_entities;
        self.summary.skipped_entities += other.summary.skipped_entities;
    }

    /// Sort violations by file, position, and kind for consistent output
    pub fn sort_violations(&mut self) {
        self.violations.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then_with(|| a.line_number.unwrap_or(0).cmp(&b.line_number.unwrap_or(0)))
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.name.cmp(&b.name))
        });
    }
}

impl Default for InspectionReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur during convention checking
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    /// A convention pattern failed to compile as a regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Report serialization or formatting failed
    #[error("Report error: {message}")]
    Report { message: String },
}

impl WardenError {
    /// Create an invalid-pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}

/// Result type for Warden operations
pub type WardenResult<T> = Result<T, WardenError>;
