use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Finding severity. Critical and error findings make a run non-compliant;
/// warnings downgrade it to compliant-with-warnings; info never affects the
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{s}")
    }
}

/// One finding produced by a check phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Finding {
    pub fn new(kind: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Finding {
            kind: kind.into(),
            message: message.into(),
            severity,
            file: None,
            fix: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Finding::new("INFO", Severity::Info, message)
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

/// Overall outcome of a compliance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Checking,
    Compliant,
    CompliantWithWarnings,
    NonCompliant,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Checking => "checking",
            Status::Compliant => "compliant",
            Status::CompliantWithWarnings => "compliant-with-warnings",
            Status::NonCompliant => "non-compliant",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Status::Compliant => "✅",
            Status::CompliantWithWarnings => "⚠️",
            Status::NonCompliant | Status::Checking => "❌",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_endpoints: u32,
    pub implemented_endpoints: u32,
    pub missing_endpoints: u32,
    pub type_matches: u32,
    pub type_mismatches: u32,
}

/// Accumulated result of a compliance run. Check phases take the report by
/// value and hand it back with their findings folded in; nothing else
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub timestamp: String,
    pub status: Status,
    pub violations: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
    pub stats: Stats,
}

impl ComplianceReport {
    pub fn new() -> Self {
        ComplianceReport {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: Status::Checking,
            violations: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// File a finding into the list its severity selects.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Critical | Severity::Error => self.violations.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.info.push(finding),
        }
    }

    /// Derive the final status from the accumulated findings.
    pub fn finalize(mut self) -> Self {
        self.status = if self.violations.is_empty() && self.warnings.is_empty() {
            Status::Compliant
        } else if !self.violations.is_empty() {
            Status::NonCompliant
        } else {
            Status::CompliantWithWarnings
        };
        self
    }

    pub fn is_compliant(&self) -> bool {
        self.status == Status::Compliant
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize compliance report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Print the console summary: statistics, then violations, warnings and
    /// info, then the final status banner.
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("📊 Compliance Check Report");
        println!("========================================\n");

        println!("📈 Statistics:");
        println!("  Total Endpoints: {}", self.stats.total_endpoints);
        println!("  Implemented: {}", self.stats.implemented_endpoints);
        println!("  Missing: {}", self.stats.missing_endpoints);
        println!("  Type Matches: {}", self.stats.type_matches);
        println!("  Type Mismatches: {}", self.stats.type_mismatches);
        println!();

        if !self.violations.is_empty() {
            println!("❌ Violations ({}):", self.violations.len());
            for violation in &self.violations {
                println!("  - [{}] {}", violation.kind, violation.message);
                if let Some(file) = &violation.file {
                    println!("    File: {file}");
                }
            }
            println!();
        }

        if !self.warnings.is_empty() {
            println!("⚠️  Warnings ({}):", self.warnings.len());
            for warning in &self.warnings {
                println!("  - [{}] {}", warning.kind, warning.message);
                if let Some(fix) = &warning.fix {
                    println!("    Fix: {fix}");
                }
            }
            println!();
        }

        if !self.info.is_empty() {
            println!("ℹ️  Information:");
            for info in &self.info {
                println!("  - {}", info.message);
            }
            println!();
        }

        println!("========================================");
        println!(
            "{} Status: {}",
            self.status.emoji(),
            self.status.as_str().to_uppercase()
        );
        println!("========================================\n");
    }
}

impl Default for ComplianceReport {
    fn default() -> Self {
        ComplianceReport::new()
    }
}
