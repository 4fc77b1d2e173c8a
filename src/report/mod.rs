//! Report generation with multiple output formats
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - InspectionReport (domain) is converted to various external representations
//! - Each formatter encapsulates the rules for its specific output format
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::violations::{InspectionReport, Severity, Violation, WardenResult};
use serde_json::Value as JsonValue;
use std::io::Write;

/// Supported output formats for inspection reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors and suggestions
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions format for workflow integration
    GitHub,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "github"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Whether to show rename suggestions
    pub show_suggestions: bool,
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_suggestions: true,
            max_violations: None,
            min_severity: None,
        }
    }
}

/// Main report formatter that dispatches to specific formatters
pub struct ReportFormatter {
    options: ReportOptions,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format an inspection report in the specified format
    pub fn format_report(
        &self,
        report: &InspectionReport,
        format: OutputFormat,
    ) -> WardenResult<String> {
        let filtered_violations = self.filter_violations(&report.violations);

        match format {
            OutputFormat::Human => Ok(self.format_human(report, &filtered_violations)),
            OutputFormat::Json => self.format_json(report, &filtered_violations),
            OutputFormat::GitHub => Ok(self.format_github(&filtered_violations)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &InspectionReport,
        format: OutputFormat,
        mut writer: W,
    ) -> WardenResult<()> {
        let formatted = self.format_report(report, format)?;
        writer
            .write_all(formatted.as_bytes())
            .map_err(|e| crate::domain::violations::WardenError::Io { source: e })?;
        Ok(())
    }

    /// Filter violations based on report options
    fn filter_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut filtered: Vec<&Violation> = violations
            .iter()
            .filter(|v| {
                if let Some(min_severity) = self.options.min_severity {
                    if v.severity < min_severity {
                        return false;
                    }
                }
                true
            })
            .collect();

        if let Some(max) = self.options.max_violations {
            filtered.truncate(max);
        }

        filtered
    }

    /// Format report in human-readable format
    fn format_human(&self, report: &InspectionReport, violations: &[&Violation]) -> String {
        let mut output = String::new();

        if violations.is_empty() {
            if self.options.use_colors {
                output.push_str("\x1b[32mAll names match their conventions\x1b[0m\n");
            } else {
                output.push_str("All names match their conventions\n");
            }
        } else {
            if self.options.use_colors {
                let color = if report.has_errors() { "31" } else { "33" };
                output.push_str(&format!("\x1b[{color}mNaming Convention Violations Found\x1b[0m\n\n"));
            } else {
                output.push_str("Naming Convention Violations Found\n\n");
            }

            // Group violations by file; unlocated violations share one pool.
            let mut by_file: std::collections::BTreeMap<Option<&std::path::Path>, Vec<&Violation>> =
                std::collections::BTreeMap::new();

            for violation in violations {
                by_file
                    .entry(violation.file_path.as_deref())
                    .or_default()
                    .push(violation);
            }

            for (file_path, file_violations) in by_file {
                match file_path {
                    Some(path) => output.push_str(&format!("{}\n", path.display())),
                    None => output.push_str("(no source location)\n"),
                }

                for violation in file_violations {
                    let severity_color = match violation.severity {
                        Severity::Error => "31",   // Red
                        Severity::Warning => "33", // Yellow
                        Severity::Info => "36",    // Cyan
                    };

                    let position = match (violation.line_number, violation.column_number) {
                        (Some(line), Some(col)) => format!("{line}:{col}"),
                        (Some(line), None) => line.to_string(),
                        _ => "-".to_string(),
                    };

                    if self.options.use_colors {
                        output.push_str(&format!(
                            "  \x1b[2m{}\x1b[0m [\x1b[{}m{}\x1b[0m] {}: {}\n",
                            position,
                            severity_color,
                            violation.severity.as_str(),
                            violation.kind.label(),
                            violation.message
                        ));
                    } else {
                        output.push_str(&format!(
                            "  {} [{}] {}: {}\n",
                            position,
                            violation.severity.as_str(),
                            violation.kind.label(),
                            violation.message
                        ));
                    }

                    if self.options.show_suggestions {
                        if let Some(suggestion) = &violation.suggested_rename {
                            if self.options.use_colors {
                                output.push_str(&format!(
                                    "    \x1b[32mconsider renaming to '{suggestion}'\x1b[0m\n"
                                ));
                            } else {
                                output.push_str(&format!("    consider renaming to '{suggestion}'\n"));
                            }
                        }
                    }
                }
                output.push('\n');
            }
        }

        output.push_str(&self.format_summary(report));
        output
    }

    /// Format report in JSON format
    fn format_json(
        &self,
        report: &InspectionReport,
        violations: &[&Violation],
    ) -> WardenResult<String> {
        let json_violations: Vec<JsonValue> = violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "kind": v.kind.as_str(),
                    "name": v.name,
                    "pattern": v.pattern,
                    "severity": v.severity.as_str(),
                    "file_path": v.file_path.as_ref().map(|p| p.display().to_string()),
                    "line_number": v.line_number,
                    "column_number": v.column_number,
                    "message": v.message,
                    "suggested_rename": v.suggested_rename,
                    "detected_at": v.detected_at.to_rfc3339()
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "violations": json_violations,
            "summary": {
                "total_entities": report.summary.total_entities,
                "skipped_entities": report.summary.skipped_entities,
                "violations_by_severity": {
                    "error": report.summary.violations_by_severity.error,
                    "warning": report.summary.violations_by_severity.warning,
                    "info": report.summary.violations_by_severity.info
                },
                "execution_time_ms": report.summary.execution_time_ms,
                "inspected_at": report.summary.inspected_at.to_rfc3339()
            },
            "config_fingerprint": report.config_fingerprint
        });

        serde_json::to_string_pretty(&json_report).map_err(|e| {
            crate::domain::violations::WardenError::report(format!("JSON serialization failed: {e}"))
        })
    }

    /// Format report for GitHub Actions
    fn format_github(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();

        for violation in violations {
            let level = match violation.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "notice",
            };

            let mut attributes = Vec::new();
            if let Some(path) = &violation.file_path {
                attributes.push(format!("file={}", path.display()));
            }
            if let Some(line) = violation.line_number {
                attributes.push(format!("line={line}"));
            }
            if let Some(col) = violation.column_number {
                attributes.push(format!("col={col}"));
            }
            attributes.push(format!("title={} naming convention", violation.kind.label()));

            output.push_str(&format!(
                "::{} {}::{}\n",
                level,
                attributes.join(","),
                violation.message
            ));
        }

        output
    }

    /// Format the summary section
    fn format_summary(&self, report: &InspectionReport) -> String {
        let counts = &report.summary.violations_by_severity;

        let body = format!(
            "{} entities checked, {} skipped: {} errors, {} warnings, {} infos ({} ms)",
            report.summary.total_entities,
            report.summary.skipped_entities,
            counts.error,
            counts.warning,
            counts.info,
            report.summary.execution_time_ms
        );

        if self.options.use_colors {
            format!("\x1b[1mSummary:\x1b[0m {body}\n")
        } else {
            format!("Summary: {body}\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violations::{EntityKind, NamedEntity};

    fn sample_report() -> InspectionReport {
        let mut report = InspectionReport::new();

        let located = NamedEntity::new(EntityKind::Class, "bad_name")
            .with_location("src/model.rs".into(), 7, 12);
        report.add_violation(
            Violation::new(&located, "bad_name", "[A-Z][A-Za-z0-9]*", Severity::Error)
                .with_suggestion("BadName"),
        );

        let unlocated = NamedEntity::new(EntityKind::Function, "Shout");
        report.add_violation(Violation::new(
            &unlocated,
            "Shout",
            "[a-z][A-Za-z0-9]*",
            Severity::Warning,
        ));

        report.set_entities_checked(4, 1);
        report.set_execution_time(3);
        report
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::parse("human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("github"), Some(OutputFormat::GitHub));
        assert_eq!(OutputFormat::parse("sarif"), None);
        assert_eq!(OutputFormat::all_formats().len(), 3);
    }

    #[test]
    fn test_human_format_plain() {
        let formatter = ReportFormatter::new(ReportOptions {
            use_colors: false,
            ..Default::default()
        });
        let output = formatter
            .format_report(&sample_report(), OutputFormat::Human)
            .unwrap();

        assert!(output.contains("Naming Convention Violations Found"));
        assert!(output.contains("src/model.rs"));
        assert!(output.contains("7:12"));
        assert!(output.contains("Name \"bad_name\" does not match pattern '[A-Z][A-Za-z0-9]*'"));
        assert!(output.contains("consider renaming to 'BadName'"));
        assert!(output.contains("(no source location)"));
        assert!(output.contains("4 entities checked, 1 skipped"));
    }

    #[test]
    fn test_human_format_clean_report() {
        let formatter = ReportFormatter::new(ReportOptions {
            use_colors: false,
            ..Default::default()
        });
        let output = formatter
            .format_report(&InspectionReport::new(), OutputFormat::Human)
            .unwrap();

        assert!(output.contains("All names match their conventions"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let formatter = ReportFormatter::default();
        let output = formatter
            .format_report(&sample_report(), OutputFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["violations"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["violations"][0]["kind"], "class");
        assert_eq!(parsed["violations"][0]["suggested_rename"], "BadName");
        assert_eq!(parsed["summary"]["total_entities"], 4);
    }

    #[test]
    fn test_github_format_annotations() {
        let formatter = ReportFormatter::default();
        let output = formatter
            .format_report(&sample_report(), OutputFormat::GitHub)
            .unwrap();

        assert!(output.contains("::error file=src/model.rs,line=7,col=12,title=Class naming convention::"));
        assert!(output.contains("::warning title=Function naming convention::"));
    }

    #[test]
    fn test_min_severity_filter() {
        let formatter = ReportFormatter::new(ReportOptions {
            min_severity: Some(Severity::Error),
            ..Default::default()
        });
        let output = formatter
            .format_report(&sample_report(), OutputFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["violations"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["violations"][0]["severity"], "error");
    }

    #[test]
    fn test_max_violations_truncation() {
        let formatter = ReportFormatter::new(ReportOptions {
            max_violations: Some(1),
            ..Default::default()
        });
        let output = formatter
            .format_report(&sample_report(), OutputFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["violations"].as_array().unwrap().len(), 1);
    }
}
