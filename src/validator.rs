//! Standalone spec validation: structural checks, platform extension
//! checks, cross references, and the advisory naming convention.
//!
//! Every check appends to one issue list and the whole pass always runs to
//! the end; only a file that cannot be loaded at all cuts the pass short.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::compliance::Severity;
use crate::config::ForgeConfig;
use crate::spec::{self, truthy, Document, HttpMethod};

#[derive(Debug, Clone)]
pub struct SpecIssue {
    pub severity: Severity,
    pub message: String,
}

impl SpecIssue {
    pub fn error(message: impl Into<String>) -> Self {
        SpecIssue {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        SpecIssue {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Critical | Severity::Error)
    }
}

/// Run every validation pass over the spec at `path`.
///
/// A file that cannot be read or parsed yields a single load error; any
/// other defect is collected without stopping the pass.
pub fn validate_spec(path: &Path, config: &ForgeConfig) -> Vec<SpecIssue> {
    let mut issues = Vec::new();
    let doc = match spec::load_document(path) {
        Ok(doc) => doc,
        Err(err) => {
            issues.push(SpecIssue::error(format!(
                "Failed to load spec file: {err:#}"
            )));
            return issues;
        }
    };

    check_basic_structure(&doc, &mut issues);
    check_platform_extensions(&doc, &mut issues);
    check_schemas(&doc, &mut issues);
    check_security(&doc, &mut issues);
    check_cross_references(&doc, &config.check.exempt_schemas, &mut issues);
    if config.validate.naming_convention {
        check_naming_convention(&doc, &mut issues);
    }
    issues
}

fn check_basic_structure(doc: &Document, issues: &mut Vec<SpecIssue>) {
    match doc.openapi_version().filter(|v| !v.is_empty()) {
        None => issues.push(SpecIssue::error("Missing OpenAPI version")),
        Some(version) if !version.starts_with("3.") => issues.push(SpecIssue::warning(format!(
            "OpenAPI version {version} may not be fully supported"
        ))),
        Some(_) => {}
    }

    if !doc.has_info() {
        issues.push(SpecIssue::error("Missing info section"));
    } else {
        if doc.info_title().filter(|t| !t.is_empty()).is_none() {
            issues.push(SpecIssue::error("Missing info.title"));
        }
        if doc.info_version().filter(|v| !v.is_empty()).is_none() {
            issues.push(SpecIssue::error("Missing info.version"));
        }
    }

    if doc.paths().map_or(true, |p| p.is_empty()) {
        issues.push(SpecIssue::warning("No paths defined"));
    }

    if doc.schemas().is_none() {
        issues.push(SpecIssue::warning("No schemas defined in components"));
    }
}

fn check_platform_extensions(doc: &Document, issues: &mut Vec<SpecIssue>) {
    match doc.vendor("x-go-zero").filter(|v| truthy(v)) {
        None => issues.push(SpecIssue::warning(
            "Missing x-go-zero configuration for backend generation",
        )),
        Some(block) => {
            if !block.get("service").is_some_and(truthy) {
                issues.push(SpecIssue::warning("Missing x-go-zero.service"));
            }
            if !block.get("group").is_some_and(truthy) {
                issues.push(SpecIssue::warning("Missing x-go-zero.group"));
            }
        }
    }

    for (path, method, op) in doc.operations() {
        check_endpoint(path, method, op, issues);
    }
}

fn check_endpoint(path: &str, method: HttpMethod, op: &Value, issues: &mut Vec<SpecIssue>) {
    let context = format!("{method} {path}");

    if !op.get("operationId").is_some_and(truthy) {
        issues.push(SpecIssue::error(format!("{context}: Missing operationId")));
    }

    if !op.get("summary").is_some_and(truthy) {
        issues.push(SpecIssue::warning(format!("{context}: Missing summary")));
    }

    if let Some(backend) = op.get("x-go-zero").filter(|v| truthy(v)) {
        if !backend.get("handler").is_some_and(truthy) {
            issues.push(SpecIssue::warning(format!(
                "{context}: Missing x-go-zero.handler"
            )));
        }
    }

    if let Some(frontend) = op.get("x-frontend").filter(|v| truthy(v)) {
        if method == HttpMethod::Get && frontend.get("swr").is_none() {
            issues.push(SpecIssue::warning(format!(
                "{context}: Consider adding x-frontend.swr for GET endpoints"
            )));
        }
    }

    if let Some(mobile) = op.get("x-mobile").filter(|v| truthy(v)) {
        if mobile.get("offline").is_some_and(truthy) && !mobile.get("cacheTime").is_some_and(truthy)
        {
            issues.push(SpecIssue::warning(format!(
                "{context}: Offline enabled but no cacheTime specified"
            )));
        }
    }

    if let Some(body) = op.get("requestBody").filter(|v| truthy(v)) {
        check_request_body(&context, body, issues);
    }

    match op.get("responses").filter(|v| truthy(v)) {
        None => issues.push(SpecIssue::error(format!("{context}: Missing responses"))),
        Some(responses) => check_responses(&context, responses, issues),
    }
}

fn check_request_body(context: &str, body: &Value, issues: &mut Vec<SpecIssue>) {
    let Some(content) = body.get("content").filter(|v| truthy(v)) else {
        issues.push(SpecIssue::error(format!(
            "{context}: Request body missing content"
        )));
        return;
    };

    let Some(json) = content.get("application/json").filter(|v| truthy(v)) else {
        issues.push(SpecIssue::warning(format!(
            "{context}: Request body not application/json"
        )));
        return;
    };

    if !json.get("schema").is_some_and(truthy) {
        issues.push(SpecIssue::error(format!(
            "{context}: Request body missing schema"
        )));
    }
}

fn check_responses(context: &str, responses: &Value, issues: &mut Vec<SpecIssue>) {
    let has_success = ["200", "201", "204"]
        .iter()
        .any(|status| responses.get(*status).is_some_and(truthy));
    if !has_success {
        issues.push(SpecIssue::warning(format!(
            "{context}: No success response defined"
        )));
    }

    let Some(responses) = responses.as_object() else {
        return;
    };
    for (status, response) in responses {
        if status == "204" || !response.get("content").is_some_and(truthy) {
            continue;
        }
        if let Some(json) = response.get("content").and_then(|c| c.get("application/json")) {
            if truthy(json) && !json.get("schema").is_some_and(truthy) {
                issues.push(SpecIssue::error(format!(
                    "{context}: Response {status} missing schema"
                )));
            }
        }
    }
}

fn check_schemas(doc: &Document, issues: &mut Vec<SpecIssue>) {
    let Some(schemas) = doc.schemas() else {
        return;
    };
    for (name, schema) in schemas {
        let has_shape = ["type", "$ref", "allOf", "oneOf", "anyOf"]
            .iter()
            .any(|key| schema.get(*key).is_some_and(truthy));
        if !has_shape {
            issues.push(SpecIssue::warning(format!("Schema {name}: Missing type")));
        }

        let properties = schema.get("properties").filter(|v| truthy(v));
        if let (Some(required), Some(properties)) = (
            schema.get("required").and_then(Value::as_array),
            properties,
        ) {
            for field in required.iter().filter_map(Value::as_str) {
                if properties.get(field).is_none() {
                    issues.push(SpecIssue::error(format!(
                        "Schema {name}: Required field '{field}' not in properties"
                    )));
                }
            }
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (prop_name, prop_schema) in properties {
                let has_tag = prop_schema
                    .get("x-go-zero")
                    .and_then(|m| m.get("tag"))
                    .is_some_and(truthy);
                if !has_tag {
                    issues.push(SpecIssue::warning(format!(
                        "Schema {name}.{prop_name}: Consider adding x-go-zero.tag"
                    )));
                }
            }
        }
    }
}

fn check_security(doc: &Document, issues: &mut Vec<SpecIssue>) {
    if let Some(schemes) = doc.security_schemes() {
        let has_bearer = schemes.values().any(|scheme| {
            scheme.get("type").and_then(Value::as_str) == Some("http")
                && scheme.get("scheme").and_then(Value::as_str) == Some("bearer")
        });
        if !has_bearer {
            issues.push(SpecIssue::warning("No bearer token authentication defined"));
        }
    }

    for (path, method, op) in doc.operations() {
        if !method.is_mutating() {
            continue;
        }
        let noauth = op
            .get("x-go-zero")
            .and_then(|m| m.get("noauth"))
            .is_some_and(truthy);
        if !op.get("security").is_some_and(truthy) && !noauth {
            issues.push(SpecIssue::warning(format!(
                "{method} {path}: Consider adding security"
            )));
        }
    }
}

fn check_cross_references(doc: &Document, exempt: &[String], issues: &mut Vec<SpecIssue>) {
    let defined: HashSet<&str> = doc
        .schemas()
        .map(|s| s.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let referenced = doc.collect_schema_refs();
    let referenced_names: HashSet<&str> = referenced.iter().map(|r| r.name()).collect();

    for schema_ref in &referenced {
        if !defined.contains(schema_ref.name()) {
            issues.push(SpecIssue::error(format!(
                "Referenced schema '{}' is not defined",
                schema_ref.name()
            )));
        }
    }

    if let Some(schemas) = doc.schemas() {
        for name in schemas.keys() {
            if !referenced_names.contains(name.as_str()) && !exempt.iter().any(|e| e == name) {
                issues.push(SpecIssue::warning(format!(
                    "Schema '{name}' is defined but never used"
                )));
            }
        }
    }
}

fn check_naming_convention(doc: &Document, issues: &mut Vec<SpecIssue>) {
    for (path, method, op) in doc.operations() {
        let Some(id) = op
            .get("operationId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        let prefix = match method {
            HttpMethod::Get => "get",
            HttpMethod::Post => "create",
            HttpMethod::Put => "update",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        };
        if !id.starts_with(prefix) {
            issues.push(SpecIssue::warning(format!(
                "{method} {path}: operationId '{id}' doesn't follow naming convention (should start with '{prefix}')"
            )));
        }
    }
}

/// Print the validation report and return whether the spec passed, meaning
/// it produced no errors. Warnings are suppressed when `errors_only` is set
/// but still counted in the summary.
pub fn print_report(spec_file: &Path, issues: &[SpecIssue], errors_only: bool) -> bool {
    println!("\n========================================");
    println!("Validation Report for: {}", spec_file.display());
    println!("========================================\n");

    let errors: Vec<&SpecIssue> = issues.iter().filter(|i| i.is_error()).collect();
    let warnings: Vec<&SpecIssue> = issues.iter().filter(|i| !i.is_error()).collect();

    if errors.is_empty() && warnings.is_empty() {
        println!("✅ Specification is valid!");
        return true;
    }

    if !errors.is_empty() {
        println!("❌ Errors ({}):", errors.len());
        for (i, issue) in errors.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.message);
        }
        println!();
    }

    if !warnings.is_empty() && !errors_only {
        println!("⚠️  Warnings ({}):", warnings.len());
        for (i, issue) in warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.message);
        }
        println!();
    }

    println!("Summary:");
    println!("  - {} error(s)", errors.len());
    println!("  - {} warning(s)", warnings.len());

    errors.is_empty()
}
