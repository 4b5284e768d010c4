//! # Compliance Module
//!
//! Audits previously generated code against the OpenAPI specifications it
//! was generated from, producing a [`ComplianceReport`] that is printed as
//! a console summary and persisted as `compliance-report.json`.
//!
//! ## Overview
//!
//! A check run walks `<root>/specs/` for YAML specifications, parses each
//! one, then folds a single report through eight fixed phases:
//!
//! 1. Specification files exist and parse
//! 2. Schema cross-references resolve
//! 3. Generated output directories exist per platform
//! 4. Every operation has its generated implementation
//! 5. TypeScript type definitions match spec schemas
//! 6. Mutating operations carry security
//! 7. Version-control cleanliness of generated/ (informational)
//! 8. Required external tools are installed
//!
//! Findings are routed by severity: critical and error findings become
//! violations, warnings stay warnings, and informational findings land in
//! the info list. A run is compliant only when both the violation and
//! warning lists are empty.
//!
//! Generated artifacts are probed through the [`ArtifactInspector`] trait,
//! so phases never read the filesystem directly.

mod inspect;
mod phases;
mod report;

pub use inspect::{ArtifactInspector, FsInspector};
pub use report::{ComplianceReport, Finding, Severity, Stats, Status};

use std::path::{Path, PathBuf};

use crate::config::ForgeConfig;
use crate::spec::{find_spec_files, load_document, Document};

/// Everything a check phase can consult.
pub struct CheckContext<'a> {
    pub root: PathBuf,
    pub specs_dir: PathBuf,
    pub generated_dir: PathBuf,
    /// Every YAML file under specs/, parsed or not.
    pub spec_files: Vec<PathBuf>,
    /// The files that parsed, in discovery order.
    pub specs: Vec<(PathBuf, Document)>,
    /// The files that did not, with the parse error.
    pub parse_failures: Vec<(PathBuf, String)>,
    pub inspector: &'a dyn ArtifactInspector,
    pub config: &'a ForgeConfig,
}

impl<'a> CheckContext<'a> {
    /// Collect and parse every spec under `<root>/specs`.
    pub fn new(root: &Path, config: &'a ForgeConfig, inspector: &'a dyn ArtifactInspector) -> Self {
        let specs_dir = root.join("specs");
        let generated_dir = root.join("generated");
        let spec_files = find_spec_files(&specs_dir);

        let mut specs = Vec::new();
        let mut parse_failures = Vec::new();
        for file in &spec_files {
            match load_document(file) {
                Ok(doc) => specs.push((file.clone(), doc)),
                Err(err) => parse_failures.push((file.clone(), format!("{err:#}"))),
            }
        }

        CheckContext {
            root: root.to_path_buf(),
            specs_dir,
            generated_dir,
            spec_files,
            specs,
            parse_failures,
            inspector,
            config,
        }
    }
}

/// Run every check phase over the project at `root` and return the
/// finalized report. Printing the summary and saving the JSON file are
/// left to the caller.
pub fn run_checks(
    root: &Path,
    config: &ForgeConfig,
    inspector: &dyn ArtifactInspector,
) -> ComplianceReport {
    println!("🚀 Starting API Specification Compliance Check...\n");

    let ctx = CheckContext::new(root, config, inspector);
    let report = ComplianceReport::new();
    let report = phases::check_spec_files(&ctx, report);
    let report = phases::check_cross_references(&ctx, report);
    let report = phases::check_generated_dirs(&ctx, report);
    let report = phases::check_implementation_match(&ctx, report);
    let report = phases::check_type_consistency(&ctx, report);
    let report = phases::check_security(&ctx, report);
    let report = phases::check_version_control(&ctx, report);
    let report = phases::check_toolchain(&ctx, report);
    report.finalize()
}
