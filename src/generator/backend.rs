//! go-zero backend generator: `api.api` route file plus one handler and one
//! logic stub per operation.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use super::templates::TemplateSet;
use super::{Artifact, GeneratorInput};
use crate::naming;
use crate::spec::{EndpointDef, TypeRef};

/// Go module path baked into generated import statements.
const PROJECT_PATH: &str = "api-service";
/// Route prefix for every generated service group.
const ROUTE_PREFIX: &str = "/api/v1";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ApiView<'a> {
    spec_file: &'a str,
    info: Value,
    service_name: String,
    group: String,
    prefix: &'static str,
    middleware: String,
    security: bool,
    schemas: Vec<SchemaView>,
    endpoints: &'a [EndpointView],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SchemaView {
    name: String,
    properties: Vec<PropertyView>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyView {
    name: String,
    #[serde(rename = "Type")]
    go_type: String,
    json_tag: String,
    validate: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct EndpointView {
    method: &'static str,
    path: String,
    operation_id: String,
    summary: String,
    handler: String,
    logic_name: String,
    request: String,
    response: String,
    has_auth: bool,
    cache: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HandlerView<'a> {
    project_path: &'static str,
    handler_name: &'a str,
    logic_name: String,
    logic_method: &'a str,
    method: &'static str,
    path: &'a str,
    has_request: bool,
    request_type: &'a str,
    has_validation: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LogicView<'a> {
    project_path: &'static str,
    logic_name: &'a str,
    logic_method: &'a str,
    summary: &'a str,
    has_request: bool,
    request_type: &'a str,
    response_type: &'a str,
    cache: &'a Map<String, Value>,
    has_database: bool,
    has_websocket: bool,
}

pub(super) fn generate(
    input: &GeneratorInput<'_>,
    templates: &TemplateSet,
) -> Result<Vec<Artifact>> {
    let config = input.doc.backend_config().unwrap_or_default();
    let endpoints: Vec<EndpointView> = input.endpoints.iter().map(endpoint_view).collect();

    let api = ApiView {
        spec_file: &input.spec_file,
        info: input.doc.info().cloned().unwrap_or(Value::Null),
        service_name: config.service_name().to_string(),
        group: config.group_name().to_string(),
        prefix: ROUTE_PREFIX,
        middleware: config.middleware_list(),
        security: config.jwt.enabled,
        schemas: schema_views(input),
        endpoints: &endpoints,
    };

    let mut artifacts = vec![Artifact {
        rel_path: naming::API_FILE.into(),
        content: templates.render("api", &api)?,
    }];

    for view in &endpoints {
        let has_request = view.request != "EmptyRequest";
        let handler = HandlerView {
            project_path: PROJECT_PATH,
            handler_name: &view.handler,
            logic_name: view.logic_name.replacen("Logic", "", 1),
            logic_method: &view.operation_id,
            method: view.method,
            path: &view.path,
            has_request,
            request_type: &view.request,
            has_validation: true,
        };
        artifacts.push(Artifact {
            rel_path: naming::handler_file(&view.operation_id),
            content: templates.render("handler", &handler)?,
        });
    }

    for view in &endpoints {
        let logic = LogicView {
            project_path: PROJECT_PATH,
            logic_name: &view.logic_name,
            logic_method: &view.operation_id,
            summary: &view.summary,
            has_request: view.request != "EmptyRequest",
            request_type: &view.request,
            response_type: &view.response,
            cache: &view.cache,
            has_database: true,
            has_websocket: false,
        };
        artifacts.push(Artifact {
            rel_path: naming::logic_file(&view.operation_id),
            content: templates.render("logic", &logic)?,
        });
    }

    Ok(artifacts)
}

/// Schemas as Go struct views. Synthetic `allOf` entries are dropped: the
/// `.api` type syntax has no composition, so only literal properties render.
fn schema_views(input: &GeneratorInput<'_>) -> Vec<SchemaView> {
    input
        .schemas
        .iter()
        .map(|schema| SchemaView {
            name: schema.name.clone(),
            properties: schema
                .properties
                .iter()
                .filter(|p| !p.is_extends())
                .map(|p| PropertyView {
                    name: p.name.clone(),
                    go_type: p.ty.go_type(),
                    json_tag: p.json_tag(),
                    validate: p.validate_rule().to_string(),
                })
                .collect(),
        })
        .collect()
}

fn endpoint_view(endpoint: &EndpointDef) -> EndpointView {
    let operation_id = endpoint.effective_operation_id();
    let backend = endpoint.backend.clone().unwrap_or_default();
    EndpointView {
        method: endpoint.method.as_upper(),
        path: endpoint.path.clone(),
        handler: backend.handler_name(&operation_id),
        logic_name: backend.logic_name(&operation_id),
        request: match &endpoint.request {
            Some(TypeRef::Named(r)) => r.name().to_string(),
            _ => "EmptyRequest".to_string(),
        },
        response: match &endpoint.response {
            Some(TypeRef::Named(r)) => r.name().to_string(),
            _ => "BaseResponse".to_string(),
        },
        has_auth: endpoint.security,
        cache: backend.cache,
        summary: endpoint.summary.clone(),
        operation_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::extract_endpoints;
    use crate::spec::Document;
    use serde_json::json;

    fn endpoint(op: Value) -> EndpointDef {
        let doc = Document::from_value(json!({ "paths": { "/users": { "post": op } } }));
        let (mut endpoints, _) = extract_endpoints(&doc);
        endpoints.remove(0)
    }

    #[test]
    fn test_endpoint_view_defaults() {
        let view = endpoint_view(&endpoint(json!({ "operationId": "createUser" })));
        assert_eq!(view.method, "POST");
        assert_eq!(view.handler, "createUserHandler");
        assert_eq!(view.logic_name, "createUserLogic");
        assert_eq!(view.request, "EmptyRequest");
        assert_eq!(view.response, "BaseResponse");
        assert!(!view.has_auth);
    }

    #[test]
    fn test_endpoint_view_named_types_and_overrides() {
        let view = endpoint_view(&endpoint(json!({
            "operationId": "createUser",
            "security": [{ "bearerAuth": [] }],
            "x-go-zero": { "handler": "CreateUserH", "cache": { "ttl": 60 } },
            "requestBody": { "content": { "application/json": {
                "schema": { "$ref": "#/components/schemas/CreateUserRequest" }
            } } },
            "responses": { "201": { "content": { "application/json": {
                "schema": { "$ref": "#/components/schemas/User" }
            } } } }
        })));
        assert_eq!(view.handler, "CreateUserH");
        assert_eq!(view.request, "CreateUserRequest");
        assert_eq!(view.response, "User");
        assert!(view.has_auth);
        assert_eq!(view.cache.get("ttl"), Some(&json!(60)));
    }

    #[test]
    fn test_inline_body_renders_as_empty_request() {
        let view = endpoint_view(&endpoint(json!({
            "operationId": "createUser",
            "requestBody": { "content": { "application/json": {
                "schema": { "type": "object" }
            } } }
        })));
        assert_eq!(view.request, "EmptyRequest");
    }

    #[test]
    fn test_artifact_paths_and_order() {
        let doc = Document::from_value(json!({
            "info": { "title": "Demo", "version": "1.0.0" },
            "paths": {
                "/users": {
                    "get": { "operationId": "getUsers" },
                    "post": { "operationId": "createUser" }
                }
            }
        }));
        let (input, _) = GeneratorInput::from_document(&doc, "api.yaml");

        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("go-zero");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("api.tpl"), "service {{ ServiceName }}").unwrap();
        std::fs::write(dir.join("handler.tpl"), "func {{ HandlerName }}").unwrap();
        std::fs::write(dir.join("logic.tpl"), "func {{ LogicName }}.{{ LogicMethod }}").unwrap();
        let templates = TemplateSet::load(root.path(), crate::naming::Platform::Backend).unwrap();

        let artifacts = generate(&input, &templates).unwrap();
        let paths: Vec<_> = artifacts
            .iter()
            .map(|a| a.rel_path.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "api.api",
                "internal/handler/getusershandler.go",
                "internal/handler/createuserhandler.go",
                "internal/logic/getuserslogic.go",
                "internal/logic/createuserlogic.go",
            ]
        );
        assert_eq!(artifacts[0].content, "service api-service");
        assert_eq!(artifacts[1].content, "func getUsersHandler");
        assert_eq!(artifacts[3].content, "func getUsersLogic.getUsers");
    }
}
