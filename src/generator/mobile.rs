//! Expo mobile generator: API service with offline queueing, hooks, the
//! offline sync manager, type definitions, and an optional websocket client.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::templates::TemplateSet;
use super::typedefs::render_types;
use super::views::{self, SchemaView};
use super::{Artifact, GeneratorInput};
use crate::naming::Platform;
use crate::spec::{truthy, EndpointDef};

const TYPES_HEADER: &str = "// Auto-generated TypeScript types for Expo\n\n";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceView<'a> {
    spec_file: &'a str,
    schemas: &'a [SchemaView],
    endpoints: &'a [EndpointView],
    web_sockets: &'a [WebSocketView],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HooksView<'a> {
    endpoints: &'a [EndpointView],
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
    mobile: MobileView,
    invalidates_cache: Vec<String>,
    params_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MobileView {
    offline: bool,
    cache_time: u64,
    background: bool,
    sync_priority: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WebSocketView {
    path: String,
    description: String,
    background: bool,
    reconnect: bool,
    heartbeat: u64,
    messages: Vec<Value>,
}

pub(super) fn generate(
    input: &GeneratorInput<'_>,
    templates: &TemplateSet,
) -> Result<Vec<Artifact>> {
    let schemas = views::schema_views(&input.schemas, Platform::Mobile);
    let endpoints: Vec<EndpointView> = input.endpoints.iter().map(endpoint_view).collect();
    let web_sockets: Vec<WebSocketView> = input
        .doc
        .websockets()
        .into_iter()
        .map(|(path, config)| WebSocketView {
            path,
            description: config.description,
            background: config.mobile.background,
            reconnect: config.mobile.reconnect,
            heartbeat: config.mobile.heartbeat_secs(),
            messages: config.messages,
        })
        .collect();

    let service = ServiceView {
        spec_file: &input.spec_file,
        schemas: &schemas,
        endpoints: &endpoints,
        web_sockets: &web_sockets,
    };
    let hooks = HooksView {
        endpoints: &endpoints,
    };
    let empty = Value::Object(serde_json::Map::new());

    let mut artifacts = vec![
        Artifact {
            rel_path: "api-service.ts".into(),
            content: templates.render("api-service", &service)?,
        },
        Artifact {
            rel_path: "hooks.ts".into(),
            content: templates.render("hooks", &hooks)?,
        },
        Artifact {
            rel_path: "offline-sync.ts".into(),
            content: templates.render("offline-sync", &empty)?,
        },
        Artifact {
            rel_path: "types.ts".into(),
            content: render_types(&input.schemas, TYPES_HEADER),
        },
    ];

    if input.doc.vendor("x-websocket").is_some_and(truthy) {
        artifacts.push(Artifact {
            rel_path: "websocket-client.ts".into(),
            content: templates.render("websocket-client", &empty)?,
        });
    }

    Ok(artifacts)
}

fn endpoint_view(endpoint: &EndpointDef) -> EndpointView {
    let mobile = endpoint.mobile.clone().unwrap_or_default();
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
        mobile: MobileView {
            offline: mobile.offline,
            cache_time: mobile.cache_time_secs(),
            background: mobile.background,
            sync_priority: mobile.sync_priority().to_string(),
        },
        invalidates_cache: mobile.invalidates_cache,
        params_type: views::params_type(endpoint),
    }
}
