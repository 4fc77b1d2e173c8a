//! Name Warden CLI - Command-line interface for naming-convention checking
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Provides clean separation between user interface and the checking core

use clap::{Parser, Subcommand, ValueEnum};
use name_warden::{
    EntityKind, NameWarden, NamedEntity, OutputFormat, ReportFormatter, ReportOptions, Severity,
    WardenConfig, WardenError, WardenResult,
};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Name Warden - naming-convention enforcement for declaration identifiers
#[derive(Parser)]
#[command(name = "name-warden")]
#[command(version = "0.1.0")]
#[command(about = "Checks declaration names against configurable convention patterns")]
#[command(
    long_about = "Name Warden validates identifiers against per-kind regular-expression \
conventions and reports violations with rename suggestions. Names can be passed on the \
command line or read from files of `kind:name` lines."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check names against their conventions
    Check {
        /// Names to check (interpreted as --kind)
        names: Vec<String>,

        /// Entity kind for the positional names
        #[arg(short, long, value_enum, default_value = "class")]
        kind: EntityKindArg,

        /// Files of `kind:name` lines to check (one entry per line)
        #[arg(short = 'i', long, action = clap::ArgAction::Append)]
        input: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Minimum severity level to report
        #[arg(short, long, value_enum)]
        severity: Option<SeverityArg>,

        /// Maximum number of violations to report
        #[arg(long)]
        max_violations: Option<usize>,

        /// Hide rename suggestions
        #[arg(long)]
        no_suggestions: bool,
    },

    /// Validate a configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// List convention kinds and their active patterns
    Patterns,
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum EntityKindArg {
    Class,
    EnumEntry,
    Function,
    Property,
    ConstProperty,
    Package,
}

impl From<EntityKindArg> for EntityKind {
    fn from(arg: EntityKindArg) -> Self {
        match arg {
            EntityKindArg::Class => EntityKind::Class,
            EntityKindArg::EnumEntry => EntityKind::EnumEntry,
            EntityKindArg::Function => EntityKind::Function,
            EntityKindArg::Property => EntityKind::Property,
            EntityKindArg::ConstProperty => EntityKind::ConstProperty,
            EntityKindArg::Package => EntityKind::Package,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> WardenResult<i32> {
    match cli.command {
        Commands::Check {
            names,
            kind,
            input,
            format,
            severity,
            max_violations,
            no_suggestions,
        } => run_check(
            cli.config,
            names,
            kind.into(),
            input,
            format.into(),
            severity.map(Into::into),
            max_violations,
            no_suggestions,
            !cli.no_color,
        ),
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
        Commands::Patterns => run_patterns(cli.config),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    config_path: Option<PathBuf>,
    names: Vec<String>,
    kind: EntityKind,
    input: Vec<PathBuf>,
    format: OutputFormat,
    min_severity: Option<Severity>,
    max_violations: Option<usize>,
    no_suggestions: bool,
    use_colors: bool,
) -> WardenResult<i32> {
    let warden = load_warden(config_path)?.with_report_formatter(ReportFormatter::new(
        ReportOptions {
            use_colors: use_colors && format == OutputFormat::Human,
            show_suggestions: !no_suggestions,
            max_violations,
            min_severity,
        },
    ));

    let mut entities: Vec<NamedEntity> = names
        .into_iter()
        .map(|name| NamedEntity::new(kind, name))
        .collect();

    for path in &input {
        entities.extend(read_entity_file(path)?);
    }

    if entities.is_empty() {
        return Err(WardenError::config(
            "No names to check: pass names as arguments or use --input",
        ));
    }

    let report = warden.check_entities(entities);
    let formatted = warden.format_report(&report, format)?;
    print!("{formatted}");

    Ok(if report.has_errors() { 1 } else { 0 })
}

/// Parse a file of `kind:name` lines; bare names default to class declarations
///
/// Blank lines and lines starting with `#` are ignored.
fn read_entity_file(path: &PathBuf) -> WardenResult<Vec<NamedEntity>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        WardenError::config(format!("Failed to read input file '{}': {}", path.display(), e))
    })?;

    let mut entities = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entity = match line.split_once(':') {
            Some((kind, name)) => {
                let kind: EntityKind = kind.trim().parse().map_err(|e| {
                    WardenError::config(format!(
                        "{}:{}: {}",
                        path.display(),
                        index + 1,
                        e
                    ))
                })?;
                NamedEntity::new(kind, name.trim())
                    .with_location(path.clone(), (index + 1) as u32, 1)
            }
            None => NamedEntity::new(EntityKind::Class, line)
                .with_location(path.clone(), (index + 1) as u32, 1),
        };
        entities.push(entity);
    }

    Ok(entities)
}

fn run_validate_config(config_file: Option<PathBuf>) -> WardenResult<i32> {
    let path = config_file.ok_or_else(|| {
        WardenError::config("No configuration file specified: pass a path or use --config")
    })?;

    match WardenConfig::load_from_file(&path) {
        Ok(config) => {
            println!("Configuration '{}' is valid", path.display());
            println!("Fingerprint: {}", config.fingerprint());
            Ok(0)
        }
        Err(e) => {
            eprintln!("Configuration '{}' is invalid: {}", path.display(), e);
            Ok(1)
        }
    }
}

fn run_patterns(config_path: Option<PathBuf>) -> WardenResult<i32> {
    let warden = load_warden(config_path)?;

    println!("{:<16} {:<10} {:<10} PATTERN", "KIND", "ENABLED", "SEVERITY");
    for kind in EntityKind::all() {
        match warden.inspector().checker(*kind) {
            Some(checker) => {
                let marker = if checker.is_default() { "" } else { " (custom)" };
                println!(
                    "{:<16} {:<10} {:<10} {}{}",
                    kind.as_str(),
                    "yes",
                    checker.severity().as_str(),
                    checker.pattern(),
                    marker
                );
            }
            None => {
                println!("{:<16} {:<10} {:<10} -", kind.as_str(), "no", "-");
            }
        }
    }

    Ok(0)
}

fn load_warden(config_path: Option<PathBuf>) -> WardenResult<NameWarden> {
    match config_path {
        Some(path) => NameWarden::from_config_file(path),
        None => NameWarden::new(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
