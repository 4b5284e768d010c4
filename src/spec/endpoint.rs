use serde_json::Value;

use super::document::{Document, SchemaRef};
use super::ext::{parse_ext, truthy, BackendOpConfig, FrontendOpConfig, MobileOpConfig};
use crate::naming;
use crate::validator::SpecIssue;

/// The path item verbs recognized as operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Match a path item key. Keys are matched exactly in lower case;
    /// anything else is not an operation.
    pub fn from_key(key: &str) -> Option<HttpMethod> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    pub fn as_upper(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether the security checks treat this verb as state changing.
    pub fn is_mutating(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_upper())
    }
}

/// How an operation's request or response body resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// Body schema is a `$ref` to a named schema.
    Named(SchemaRef),
    /// Body carries an inline schema with no name.
    Inline,
}

impl TypeRef {
    pub fn named(&self) -> Option<&SchemaRef> {
        match self {
            TypeRef::Named(r) => Some(r),
            TypeRef::Inline => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterDef {
    pub name: String,
    pub required: bool,
    pub schema: Option<Value>,
}

/// One operation with everything the generators and checker read from it.
#[derive(Debug, Clone)]
pub struct EndpointDef {
    pub method: HttpMethod,
    pub path: String,
    /// Declared operation id. Empty declarations count as missing.
    pub operation_id: Option<String>,
    pub summary: String,
    pub has_request_body: bool,
    pub has_params: bool,
    pub parameters: Vec<ParameterDef>,
    /// Request body type from the `application/json` schema. `None` when the
    /// operation takes no body or the body declares no JSON schema, even if
    /// `has_request_body` is set.
    pub request: Option<TypeRef>,
    /// Success response type from the 200 or 201 response, in that order.
    pub response: Option<TypeRef>,
    /// Operation level security requirement.
    pub security: bool,
    pub backend: Option<BackendOpConfig>,
    pub frontend: Option<FrontendOpConfig>,
    pub mobile: Option<MobileOpConfig>,
}

impl EndpointDef {
    /// The declared operation id, or the deterministic placeholder when the
    /// operation did not declare one. Generated artifacts always use this.
    pub fn effective_operation_id(&self) -> String {
        match &self.operation_id {
            Some(id) => id.clone(),
            None => naming::placeholder_operation_id(self.method.as_str(), &self.path),
        }
    }
}

/// Extract every operation in document order.
///
/// A missing operation id is reported as an issue but never halts
/// extraction; the endpoint still comes back and renders under its
/// placeholder id.
pub fn extract_endpoints(doc: &Document) -> (Vec<EndpointDef>, Vec<SpecIssue>) {
    let mut endpoints = Vec::new();
    let mut issues = Vec::new();

    for (path, method, op) in doc.operations() {
        let operation_id = op
            .get("operationId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if operation_id.is_none() {
            issues.push(SpecIssue::error(format!(
                "{method} {path}: Missing operationId"
            )));
        }

        let request = op
            .get("requestBody")
            .and_then(|b| b.get("content"))
            .and_then(|c| c.get("application/json"))
            .and_then(|m| m.get("schema"))
            .map(|schema| match named_ref(schema) {
                Some(r) => TypeRef::Named(r),
                None => TypeRef::Inline,
            });
        let parameters = extract_parameters(op);

        endpoints.push(EndpointDef {
            method,
            path: path.clone(),
            operation_id,
            summary: op
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            has_request_body: op.get("requestBody").is_some_and(truthy),
            has_params: op.get("parameters").is_some_and(truthy),
            parameters,
            request,
            response: response_type(op),
            security: op.get("security").is_some_and(truthy),
            backend: op.get("x-go-zero").filter(|v| truthy(v)).map(parse_ext),
            frontend: op.get("x-frontend").filter(|v| truthy(v)).map(parse_ext),
            mobile: op.get("x-mobile").filter(|v| truthy(v)).map(parse_ext),
        });
    }

    (endpoints, issues)
}

fn response_type(op: &Value) -> Option<TypeRef> {
    let responses = op.get("responses")?;
    let success = responses
        .get("200")
        .filter(|v| truthy(v))
        .or_else(|| responses.get("201").filter(|v| truthy(v)))?;
    let schema = success
        .get("content")?
        .get("application/json")?
        .get("schema")?;
    Some(match named_ref(schema) {
        Some(r) => TypeRef::Named(r),
        None => TypeRef::Inline,
    })
}

fn named_ref(schema: &Value) -> Option<SchemaRef> {
    schema
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(SchemaRef::parse)
}

fn extract_parameters(op: &Value) -> Vec<ParameterDef> {
    let Some(params) = op.get("parameters").and_then(Value::as_array) else {
        return Vec::new();
    };
    params
        .iter()
        .filter_map(|p| {
            let name = p.get("name").and_then(Value::as_str)?.to_string();
            Some(ParameterDef {
                name,
                required: p.get("required").is_some_and(truthy),
                schema: p.get("schema").cloned(),
            })
        })
        .collect()
}
