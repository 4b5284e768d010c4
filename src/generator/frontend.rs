//! Next.js frontend generator: typed API client, SWR hooks, server actions,
//! and the shared TypeScript type definitions.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use super::templates::TemplateSet;
use super::typedefs::render_types;
use super::views::{self, SchemaView};
use super::{Artifact, GeneratorInput};
use crate::naming::Platform;
use crate::spec::{truthy, Document, EndpointDef, TypeRef};
use crate::typemap::TypeDesc;

const TYPES_HEADER: &str = "// Auto-generated TypeScript types\n\n";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ClientView<'a> {
    spec_file: &'a str,
    schemas: &'a [SchemaView],
    endpoints: &'a [EndpointView],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HooksView<'a> {
    endpoints: &'a [EndpointView],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActionsView<'a> {
    endpoints: &'a [EndpointView],
    next_cache: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EndpointView {
    method: &'static str,
    path: String,
    operation_id: String,
    summary: String,
    has_request: bool,
    has_params: bool,
    request_type: Option<String>,
    response_type: String,
    has_validation: bool,
    #[serde(rename = "SWR")]
    swr: Option<SwrView>,
    invalidates_cache: Vec<String>,
    server_action: bool,
    cache_time: u64,
    next_cache: Option<Value>,
    revalidate_paths: Vec<String>,
    revalidate_tags: Vec<String>,
    request_fields: Option<Vec<FieldView>>,
    params_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SwrView {
    enabled: bool,
    revalidate_on_focus: bool,
    revalidate_on_reconnect: bool,
    refresh_interval: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FieldView {
    name: String,
    #[serde(rename = "Type")]
    ts_type: String,
}

pub(super) fn generate(
    input: &GeneratorInput<'_>,
    templates: &TemplateSet,
) -> Result<Vec<Artifact>> {
    let schemas = views::schema_views(&input.schemas, Platform::Frontend);
    let endpoints: Vec<EndpointView> = input
        .endpoints
        .iter()
        .map(|e| endpoint_view(e, input.doc))
        .collect();

    let client = ClientView {
        spec_file: &input.spec_file,
        schemas: &schemas,
        endpoints: &endpoints,
    };
    let hooks = HooksView {
        endpoints: &endpoints,
    };
    let actions = ActionsView {
        endpoints: &endpoints,
        next_cache: input
            .doc
            .frontend_cache()
            .filter(|v| truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
    };

    Ok(vec![
        Artifact {
            rel_path: "api-client.ts".into(),
            content: templates.render("api-client", &client)?,
        },
        Artifact {
            rel_path: "hooks.ts".into(),
            content: templates.render("hooks", &hooks)?,
        },
        Artifact {
            rel_path: "server-actions.ts".into(),
            content: templates.render("server-actions", &actions)?,
        },
        Artifact {
            rel_path: "types.ts".into(),
            content: render_types(&input.schemas, TYPES_HEADER),
        },
    ])
}

fn endpoint_view(endpoint: &EndpointDef, doc: &Document) -> EndpointView {
    let frontend = endpoint.frontend.clone().unwrap_or_default();
    let swr = frontend.swr_enabled().then(|| SwrView {
        enabled: true,
        revalidate_on_focus: frontend.revalidate_on_focus(),
        revalidate_on_reconnect: frontend.revalidate_on_reconnect(),
        refresh_interval: frontend.refresh_interval_ms(),
    });
    let request_fields = if frontend.server_action && endpoint.has_request_body {
        request_fields(endpoint, doc)
    } else {
        None
    };

    EndpointView {
        method: endpoint.method.as_upper(),
        path: endpoint.path.clone(),
        operation_id: endpoint.effective_operation_id(),
        summary: endpoint.summary.clone(),
        has_request: endpoint.has_request_body,
        has_params: endpoint.has_params,
        request_type: views::ts_request_type(endpoint),
        response_type: views::ts_response_type(endpoint),
        has_validation: endpoint.has_request_body,
        swr,
        invalidates_cache: frontend.invalidates_cache.clone(),
        server_action: frontend.server_action,
        cache_time: frontend.cache_time_secs(),
        next_cache: frontend.cache.clone(),
        revalidate_paths: frontend.revalidate_paths.clone(),
        revalidate_tags: frontend.revalidate_tags.clone(),
        request_fields,
        params_type: views::params_type(endpoint),
    }
}

/// Fields of the referenced request schema, for server action signatures.
/// Inline bodies and references to schemas the document does not define
/// yield nothing.
fn request_fields(endpoint: &EndpointDef, doc: &Document) -> Option<Vec<FieldView>> {
    let named = match &endpoint.request {
        Some(TypeRef::Named(r)) => r,
        _ => return None,
    };
    let schema = doc.schema(named.name())?;
    let fields = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| FieldView {
                    name: name.clone(),
                    ts_type: TypeDesc::from_schema(prop).ts_type(),
                })
                .collect()
        })
        .unwrap_or_default();
    Some(fields)
}
