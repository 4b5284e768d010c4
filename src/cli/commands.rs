use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::compliance::{self, FsInspector};
use crate::config::load_config;
use crate::generator::{self, GeneratorInput, Platform};
use crate::spec::load_document;
use crate::validator::{print_report, validate_spec};

/// Command-line interface for SpecForge
///
/// Provides commands for generating platform code from OpenAPI
/// specifications, validating specs, and checking previously generated
/// code for compliance.
#[derive(Parser)]
#[command(name = "specforge")]
#[command(about = "SpecForge CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for SpecForge
#[derive(Subcommand)]
pub enum Commands {
    /// Generate platform code from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI specification file (YAML or JSON)
        spec: PathBuf,

        /// Output directory for generated code
        output: PathBuf,

        /// Platform to generate code for
        #[arg(short, long, value_enum, default_value_t = PlatformArg::All)]
        platform: PlatformArg,

        /// Directory holding the per-platform template sets
        #[arg(long, default_value = "templates")]
        templates: PathBuf,
    },
    /// Validate an OpenAPI specification
    ///
    /// Checks the specification for common issues:
    /// - Basic OpenAPI structure (openapi, info, paths)
    /// - Platform extension coverage (x-go-zero, x-frontend, x-mobile)
    /// - Schema definitions and cross-references
    /// - Security on mutating endpoints
    /// - RESTful operationId naming
    Validate {
        /// Path to the OpenAPI specification file (YAML or JSON)
        spec: PathBuf,

        /// Show only errors (hide warnings)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Check generated code compliance against the specifications
    Check {
        /// Project root containing the specs/ and generated/ directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

/// Platform selector accepted by `generate --platform`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Go-Zero backend service
    Backend,
    /// Next.js frontend client
    Frontend,
    /// Expo mobile client
    Mobile,
    /// Every platform in one pass
    All,
}

impl PlatformArg {
    fn platforms(self) -> Vec<Platform> {
        match self {
            PlatformArg::Backend => vec![Platform::Backend],
            PlatformArg::Frontend => vec![Platform::Frontend],
            PlatformArg::Mobile => vec![Platform::Mobile],
            PlatformArg::All => Platform::ALL.to_vec(),
        }
    }
}

/// Execute a parsed command and return the process exit code.
pub fn run_cli(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Generate {
            spec,
            output,
            platform,
            templates,
        } => generate(&spec, &output, platform, &templates),
        Commands::Validate { spec, errors_only } => validate(&spec, errors_only),
        Commands::Check { root } => check(&root),
    }
}

fn generate(spec: &Path, output: &Path, platform: PlatformArg, templates: &Path) -> Result<i32> {
    let doc = load_document(spec)?;
    let (input, issues) = GeneratorInput::from_document(&doc, spec.display().to_string());
    for issue in &issues {
        eprintln!("⚠️  {}", issue.message);
    }
    generator::generate_all(&input, &platform.platforms(), templates, output)?;
    Ok(0)
}

fn validate(spec: &Path, errors_only: bool) -> Result<i32> {
    if !spec.exists() {
        eprintln!("File not found: {}", spec.display());
        return Ok(1);
    }
    let config = load_config(Path::new("."))?;
    let issues = validate_spec(spec, &config);
    let valid = print_report(spec, &issues, errors_only);
    Ok(i32::from(!valid))
}

fn check(root: &Path) -> Result<i32> {
    let config = load_config(root)?;
    let report = compliance::run_checks(root, &config, &FsInspector);
    report.print_summary();
    let report_file = root.join("compliance-report.json");
    report.save(&report_file)?;
    println!("📄 Full report saved to: {}", report_file.display());
    Ok(i32::from(!report.is_compliant()))
}
