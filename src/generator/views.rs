//! View structs shared by the frontend and mobile generators.
//!
//! Serialized field names are the identifiers the templates address, so they
//! stay PascalCase regardless of Rust naming.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::naming::Platform;
use crate::spec::{EndpointDef, SchemaDef, TypeRef};
use crate::typemap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SchemaView {
    pub name: String,
    pub properties: Vec<PropertyView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PropertyView {
    pub name: String,
    pub zod_type: String,
    pub ts_type: String,
    pub optional: bool,
    pub validation: Map<String, Value>,
}

/// Map extracted schemas into TypeScript-side views, picking the validation
/// hints declared for `platform`. Synthetic `allOf` parents come through with
/// the parent's zod schema and interface names so templates can compose them.
pub(crate) fn schema_views(schemas: &[SchemaDef], platform: Platform) -> Vec<SchemaView> {
    schemas
        .iter()
        .map(|schema| SchemaView {
            name: schema.name.clone(),
            properties: schema
                .properties
                .iter()
                .map(|prop| PropertyView {
                    name: prop.name.clone(),
                    zod_type: prop.ty.zod_expr(),
                    ts_type: prop.ty.ts_type(),
                    optional: prop.optional,
                    validation: match platform {
                        Platform::Frontend => prop.validation.frontend.clone(),
                        Platform::Mobile => prop.validation.mobile.clone(),
                        Platform::Backend => Map::new(),
                    },
                })
                .collect(),
        })
        .collect()
}

/// TypeScript request body type: the referenced schema name, `RequestBody`
/// for an inline schema, nothing when the operation declares no JSON body.
pub(crate) fn ts_request_type(endpoint: &EndpointDef) -> Option<String> {
    match &endpoint.request {
        Some(TypeRef::Named(r)) => Some(r.name().to_string()),
        Some(TypeRef::Inline) => Some("RequestBody".to_string()),
        None => None,
    }
}

/// TypeScript response type from the success response, `any` when it does
/// not declare a JSON schema.
pub(crate) fn ts_response_type(endpoint: &EndpointDef) -> String {
    match &endpoint.response {
        Some(TypeRef::Named(r)) => r.name().to_string(),
        Some(TypeRef::Inline) => "ResponseBody".to_string(),
        None => "any".to_string(),
    }
}

/// Inline object type for an operation's parameters, `None` when it has
/// none. Parameters without a schema type as `any`.
pub(crate) fn params_type(endpoint: &EndpointDef) -> Option<String> {
    if !endpoint.has_params {
        return None;
    }
    let fields = endpoint
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{}{}: {}",
                p.name,
                if p.required { "" } else { "?" },
                typemap::ts_type_of(p.schema.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{{ {fields} }}"))
}
