//! The check phases, in their fixed run order.
//!
//! Every phase takes the report by value and hands it back with its
//! findings folded in; [`super::run_checks`] threads one report through
//! all eight. Phases never abort the run: a phase that finds nothing to
//! do records its findings and returns.

use std::collections::HashSet;
use std::process::{Command, Stdio};

use serde_json::{Map, Value};

use crate::compliance::report::{ComplianceReport, Finding, Severity};
use crate::compliance::CheckContext;
use crate::config::ToolProbe;
use crate::naming::{self, Platform};
use crate::spec::{parse_ext, truthy, BackendOpConfig, HttpMethod};

/// Phase 1: the specs directory and its files.
///
/// A missing directory or an empty one is critical and short-circuits the
/// phase; files that failed to parse are each reported as critical.
pub(crate) fn check_spec_files(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("📁 Checking specification files...");

    if !ctx.inspector.exists(&ctx.specs_dir) {
        report.push(Finding::new(
            "MISSING_SPECS_DIR",
            Severity::Critical,
            "Specifications directory not found",
        ));
        return report;
    }

    if ctx.spec_files.is_empty() {
        report.push(Finding::new(
            "NO_SPEC_FILES",
            Severity::Critical,
            "No specification files found",
        ));
        return report;
    }

    for (file, err) in &ctx.parse_failures {
        report.push(
            Finding::new("INVALID_SPEC", Severity::Critical, err.clone())
                .with_file(file.display().to_string()),
        );
    }

    report.push(Finding::info(format!(
        "Found {} specification file(s)",
        ctx.spec_files.len()
    )));
    report
}

/// Phase 2: schema cross-references, resolved per document.
pub(crate) fn check_cross_references(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("🔗 Checking schema references...");

    for (file, doc) in &ctx.specs {
        let defined: HashSet<&str> = doc
            .schemas()
            .map(|s| s.keys().map(String::as_str).collect())
            .unwrap_or_default();
        let referenced = doc.collect_schema_refs();
        let referenced_names: HashSet<&str> = referenced.iter().map(|r| r.name()).collect();

        for schema_ref in &referenced {
            if !defined.contains(schema_ref.name()) {
                report.push(
                    Finding::new(
                        "INVALID_REF",
                        Severity::Error,
                        format!("Referenced schema '{}' is not defined", schema_ref.name()),
                    )
                    .with_file(file.display().to_string()),
                );
            }
        }

        if let Some(schemas) = doc.schemas() {
            for name in schemas.keys() {
                if !referenced_names.contains(name.as_str())
                    && !ctx.config.check.exempt_schemas.iter().any(|e| e == name)
                {
                    report.push(
                        Finding::new(
                            "UNUSED_SCHEMA",
                            Severity::Warning,
                            format!("Schema '{name}' is defined but never used"),
                        )
                        .with_file(file.display().to_string()),
                    );
                }
            }
        }
    }
    report
}

/// Phase 3: per-platform generated output directories.
pub(crate) fn check_generated_dirs(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("🔍 Checking generated code...");

    let missing: Vec<&str> = ctx
        .config
        .check
        .platforms
        .iter()
        .map(String::as_str)
        .filter(|platform| !ctx.inspector.exists(&ctx.generated_dir.join(platform)))
        .collect();

    if !missing.is_empty() {
        report.push(
            Finding::new(
                "MISSING_GENERATED",
                Severity::Warning,
                format!("Generated code missing for: {}", missing.join(", ")),
            )
            .with_fix("Run: specforge generate"),
        );
    }
    report
}

/// Phase 4: every spec operation against the generated implementations.
///
/// Operations count toward `totalEndpoints` whether or not they carry an
/// operationId; coverage is reported only when at least one was counted.
pub(crate) fn check_implementation_match(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("🔄 Checking spec-implementation match...");

    for (_, doc) in &ctx.specs {
        for (path, method, op) in doc.operations() {
            report.stats.total_endpoints += 1;
            report = check_operation(ctx, report, path, method, op);
        }
    }

    if report.stats.total_endpoints > 0 {
        let rate = f64::from(report.stats.implemented_endpoints)
            / f64::from(report.stats.total_endpoints)
            * 100.0;
        report.push(Finding::info(format!(
            "Implementation coverage: {rate:.1}%"
        )));
    }
    report
}

fn check_operation(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
    path: &str,
    method: HttpMethod,
    op: &Value,
) -> ComplianceReport {
    let operation_id = match op
        .get("operationId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
    {
        Some(id) => id,
        None => {
            report.push(Finding::new(
                "MISSING_OPERATION_ID",
                Severity::Error,
                format!("{} {path}: Missing operationId", method.as_upper()),
            ));
            return report;
        }
    };

    if op.get("x-go-zero").is_some_and(truthy) {
        let backend_dir = ctx.generated_dir.join(Platform::Backend.as_str());
        let handler_file = backend_dir.join(naming::handler_file(operation_id));
        let logic_file = backend_dir.join(naming::logic_file(operation_id));

        if ctx.inspector.exists(&handler_file) {
            report.stats.implemented_endpoints += 1;
        } else {
            report.push(
                Finding::new(
                    "MISSING_HANDLER",
                    Severity::Error,
                    format!("Missing handler for {operation_id}"),
                )
                .with_file(handler_file.display().to_string()),
            );
            report.stats.missing_endpoints += 1;
        }

        if !ctx.inspector.exists(&logic_file) {
            report.push(
                Finding::new(
                    "MISSING_LOGIC",
                    Severity::Error,
                    format!("Missing logic for {operation_id}"),
                )
                .with_file(logic_file.display().to_string()),
            );
        }
    }

    report = check_client_method(ctx, report, Platform::Frontend, "x-frontend", operation_id, op);
    check_client_method(ctx, report, Platform::Mobile, "x-mobile", operation_id, op)
}

/// Probe a client artifact for the `async <operationId>(` method. Only an
/// existing client file can produce a finding; a missing one is already
/// covered by the generated-dirs phase.
fn check_client_method(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
    platform: Platform,
    ext_key: &str,
    operation_id: &str,
    op: &Value,
) -> ComplianceReport {
    if !op.get(ext_key).is_some_and(truthy) {
        return report;
    }
    let (kind, label) = match platform {
        Platform::Frontend => ("MISSING_FRONTEND_METHOD", "Frontend"),
        Platform::Mobile => ("MISSING_MOBILE_METHOD", "Mobile"),
        Platform::Backend => return report,
    };
    let Some(client) = platform.client_file() else {
        return report;
    };
    let client_file = ctx.generated_dir.join(platform.as_str()).join(client);
    if ctx.inspector.exists(&client_file)
        && !ctx
            .inspector
            .contains(&client_file, &format!("async {operation_id}("))
    {
        report.push(Finding::new(
            kind,
            Severity::Warning,
            format!("{label} method missing for {operation_id}"),
        ));
    }
    report
}

/// Phase 5: TypeScript type definitions against spec schemas.
///
/// Schemas are collected across every spec file, later files winning on a
/// name collision, then each client platform's types.ts is probed for the
/// interface and its properties.
pub(crate) fn check_type_consistency(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("🔢 Checking type consistency...");

    let mut schemas: Map<String, Value> = Map::new();
    for (_, doc) in &ctx.specs {
        if let Some(defined) = doc.schemas() {
            for (name, schema) in defined {
                schemas.insert(name.clone(), schema.clone());
            }
        }
    }

    report = check_platform_types(ctx, report, Platform::Frontend, &schemas);
    report = check_platform_types(ctx, report, Platform::Mobile, &schemas);

    let compared = report.stats.type_matches + report.stats.type_mismatches;
    if compared > 0 {
        let accuracy = f64::from(report.stats.type_matches) / f64::from(compared) * 100.0;
        report.push(Finding::info(format!("Type consistency: {accuracy:.1}%")));
    }
    report
}

fn check_platform_types(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
    platform: Platform,
    schemas: &Map<String, Value>,
) -> ComplianceReport {
    let Some(types) = platform.types_file() else {
        return report;
    };
    let types_file = ctx.generated_dir.join(platform.as_str()).join(types);

    if !ctx.inspector.exists(&types_file) {
        report.push(Finding::new(
            "MISSING_TYPES_FILE",
            Severity::Warning,
            format!("Types file missing for {}", platform.as_str()),
        ));
        return report;
    }

    for (name, schema) in schemas {
        if !ctx
            .inspector
            .contains(&types_file, &format!("interface {name}"))
        {
            report.push(Finding::new(
                "MISSING_TYPE",
                Severity::Warning,
                format!("Type '{name}' not found in {}", platform.as_str()),
            ));
            report.stats.type_mismatches += 1;
            continue;
        }
        report.stats.type_matches += 1;

        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            continue;
        };
        for prop in properties.keys() {
            if !ctx.inspector.contains(&types_file, &format!("{prop}:")) {
                report.push(Finding::new(
                    "MISSING_PROPERTY",
                    Severity::Warning,
                    format!("Property '{prop}' missing in {name} ({})", platform.as_str()),
                ));
                report.stats.type_mismatches += 1;
            }
        }
    }
    report
}

/// Phase 6: security coverage over mutating operations.
///
/// POST, PUT and DELETE operations need operation-level or root-level
/// security unless the backend extension opts out with `noauth`.
pub(crate) fn check_security(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("🔒 Checking security configuration...");

    let mut has_scheme = false;
    let mut protected = 0u32;
    let mut unprotected = 0u32;

    for (_, doc) in &ctx.specs {
        if doc.security_schemes().is_some() {
            has_scheme = true;
        }

        for (path, method, op) in doc.operations() {
            if !method.is_mutating() {
                continue;
            }
            if op.get("security").is_some_and(truthy) || doc.has_root_security() {
                protected += 1;
            } else {
                let backend: BackendOpConfig =
                    op.get("x-go-zero").map(parse_ext).unwrap_or_default();
                if !backend.noauth {
                    unprotected += 1;
                    report.push(Finding::new(
                        "UNPROTECTED_ENDPOINT",
                        Severity::Warning,
                        format!("{} {path} lacks security", method.as_upper()),
                    ));
                }
            }
        }
    }

    if !has_scheme {
        report.push(Finding::new(
            "NO_SECURITY_SCHEME",
            Severity::Warning,
            "No security scheme defined",
        ));
    }

    report.push(Finding::info(format!(
        "Security: {protected} protected, {unprotected} unprotected endpoints"
    )));
    report
}

/// Phase 7: version-control cleanliness of generated/. Informational only;
/// a missing git binary or a directory outside any repository records a
/// skip note instead of failing.
pub(crate) fn check_version_control(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("📦 Checking git status...");

    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(&ctx.root)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let status = String::from_utf8_lossy(&out.stdout);
            let modified: Vec<&str> = status
                .lines()
                .filter(|line| line.contains("generated/"))
                .map(str::trim)
                .collect();
            if !modified.is_empty() {
                report.push(
                    Finding::new(
                        "UNCOMMITTED_GENERATED",
                        Severity::Info,
                        "Generated files have uncommitted changes",
                    )
                    .with_file(modified.join(", "))
                    .with_fix("Commit or discard changes in generated/"),
                );
            }
        }
        _ => report.push(Finding::info(
            "Git status check skipped (not a git repository)",
        )),
    }
    report
}

/// Phase 8: required external tools.
pub(crate) fn check_toolchain(
    ctx: &CheckContext<'_>,
    mut report: ComplianceReport,
) -> ComplianceReport {
    println!("📚 Checking dependencies...");

    let missing: Vec<&str> = ctx
        .config
        .check
        .tools
        .iter()
        .filter(|tool| !probe_tool(tool))
        .map(|tool| tool.name.as_str())
        .collect();

    if !missing.is_empty() {
        report.push(Finding::new(
            "MISSING_DEPENDENCIES",
            Severity::Error,
            format!("Required tools missing: {}", missing.join(", ")),
        ));
    }
    report
}

fn probe_tool(tool: &ToolProbe) -> bool {
    Command::new(&tool.command)
        .args(&tool.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
