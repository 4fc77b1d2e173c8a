//! Configuration loading and management for Name Warden
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain objects
//! - Default conventions are embedded in the domain, not infrastructure
//! - Every configured pattern is compiled during validation, so a bad regular
//!   expression is rejected at load time rather than on first use

use crate::checker::validate_pattern;
use crate::domain::violations::{EntityKind, Severity, WardenError, WardenResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Main configuration structure for Name Warden
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Configuration format version
    pub version: String,
    /// Per-kind convention rules; kinds not listed use their defaults
    #[serde(default)]
    pub conventions: BTreeMap<EntityKind, ConventionRule>,
}

/// Convention rule configuration for a single entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConventionRule {
    /// Pattern override (uses the kind's built-in default if not specified)
    pub pattern: Option<String>,
    /// Severity override (uses the warden default if not specified)
    pub severity: Option<Severity>,
    /// Whether this convention is enforced
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ConventionRule {
    fn default() -> Self {
        Self {
            pattern: None,
            severity: None,
            enabled: true,
        }
    }
}

impl ConventionRule {
    /// A rule that enforces the kind's default pattern
    pub fn enabled() -> Self {
        Self::default()
    }

    /// A rule that turns enforcement off for a kind
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl WardenConfig {
    /// The severity applied when neither the rule nor the caller specifies one
    pub const DEFAULT_SEVERITY: Severity = Severity::Warning;

    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WardenResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            WardenError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            WardenError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> WardenResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| WardenError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Get default configuration: every kind enforced with its built-in pattern
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            conventions: EntityKind::all()
                .iter()
                .map(|kind| (*kind, ConventionRule::enabled()))
                .collect(),
        }
    }

    /// Validate the configuration for consistency and correctness
    ///
    /// Fails fast: every configured pattern must compile here, so a checker built
    /// from a validated config cannot hit a pattern error later.
    pub fn validate(&self) -> WardenResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(WardenError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        for (kind, rule) in &self.conventions {
            if let Some(pattern) = &rule.pattern {
                validate_pattern(pattern).map_err(|e| {
                    WardenError::config(format!("Invalid pattern for '{kind}': {e}"))
                })?;
            }
        }

        Ok(())
    }

    /// The effective pattern for a kind: the override if present, else the default
    pub fn effective_pattern(&self, kind: EntityKind) -> &str {
        self.conventions
            .get(&kind)
            .and_then(|rule| rule.pattern.as_deref())
            .unwrap_or_else(|| kind.default_pattern())
    }

    /// The effective severity for a kind
    pub fn effective_severity(&self, kind: EntityKind) -> Severity {
        self.conventions
            .get(&kind)
            .and_then(|rule| rule.severity)
            .unwrap_or(Self::DEFAULT_SEVERITY)
    }

    /// Whether a kind's convention is enforced
    ///
    /// Kinds absent from the config are enforced with defaults; only an explicit
    /// `enabled: false` turns a convention off.
    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        self.conventions
            .get(&kind)
            .map(|rule| rule.enabled)
            .unwrap_or(true)
    }

    /// All kinds whose conventions are enforced, in stable order
    pub fn enabled_kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        EntityKind::all()
            .iter()
            .copied()
            .filter(|kind| self.is_enabled(*kind))
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> WardenResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WardenError::config(format!("Failed to serialize config: {e}")))
    }

    /// Create a fingerprint of the configuration for report stamping
    pub fn fingerprint(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.version.hash(&mut hasher);
        // BTreeMap iteration order is already stable by kind.
        for (kind, rule) in &self.conventions {
            kind.as_str().hash(&mut hasher);
            rule.pattern.hash(&mut hasher);
            rule.severity.hash(&mut hasher);
            rule.enabled.hash(&mut hasher);
        }

        format!("{:x}", hasher.finish())
    }
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_true() -> bool {
    true
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: WardenConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: WardenConfig::default(),
        }
    }

    /// Override the pattern for a kind
    pub fn pattern(mut self, kind: EntityKind, pattern: impl Into<String>) -> Self {
        let rule = self.config.conventions.entry(kind).or_default();
        rule.enabled = true;
        rule.pattern = Some(pattern.into());
        self
    }

    /// Override the severity for a kind
    pub fn severity(mut self, kind: EntityKind, severity: Severity) -> Self {
        let rule = self.config.conventions.entry(kind).or_default();
        rule.enabled = true;
        rule.severity = Some(severity);
        self
    }

    /// Disable enforcement for a kind
    pub fn disable(mut self, kind: EntityKind) -> Self {
        self.config.conventions.insert(kind, ConventionRule::disabled());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> WardenResult<WardenConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
