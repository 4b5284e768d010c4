use serde_json::{Map, Value};
use std::collections::HashSet;

use super::endpoint::HttpMethod;
use super::ext::{parse_ext, truthy, BackendConfig, WebSocketConfig};

/// Prefix of a canonical schema reference path.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Typed reference to a named schema.
///
/// Produced once by [`SchemaRef::parse`] so downstream code never re-splits
/// `$ref` path strings. The resolver accepts both the canonical
/// `#/components/schemas/<name>` form and a bare name, and keeps only the
/// final path segment either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef(String);

impl SchemaRef {
    /// Resolve a `$ref` path to a schema reference.
    ///
    /// Returns `None` when the path has no usable final segment.
    pub fn parse(ref_path: &str) -> Option<Self> {
        let name = ref_path.rsplit('/').next().unwrap_or(ref_path);
        if name.is_empty() {
            return None;
        }
        Some(SchemaRef(name.to_string()))
    }

    /// The referenced schema name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The canonical reference path for this schema.
    pub fn ref_path(&self) -> String {
        format!("{}{}", SCHEMA_REF_PREFIX, self.0)
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed specification document.
///
/// Thin wrapper over the raw JSON tree. Map iteration preserves document
/// order, which generated artifacts depend on. The wrapper does not enforce
/// OpenAPI semantics; structural problems are surfaced by the validator and
/// the compliance checker, not here.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn from_value(root: Value) -> Self {
        Document { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `openapi` version marker, when present as a string.
    pub fn openapi_version(&self) -> Option<&str> {
        self.root.get("openapi").and_then(Value::as_str)
    }

    /// The raw `info` block.
    pub fn info(&self) -> Option<&Value> {
        self.root.get("info")
    }

    pub fn info_title(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
    }

    pub fn info_version(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|i| i.get("version"))
            .and_then(Value::as_str)
    }

    pub fn has_info(&self) -> bool {
        self.root.get("info").is_some_and(truthy)
    }

    /// The `paths` mapping in document order.
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    /// Every recognized operation as `(path, method, operation)` in document
    /// order. Path item keys that are not one of the five recognized verbs
    /// (shared parameters, summaries, extensions) are skipped.
    pub fn operations(&self) -> Vec<(&String, HttpMethod, &Value)> {
        let mut ops = Vec::new();
        if let Some(paths) = self.paths() {
            for (path, item) in paths {
                if let Some(item_obj) = item.as_object() {
                    for (key, op) in item_obj {
                        if let Some(method) = HttpMethod::from_key(key) {
                            ops.push((path, method, op));
                        }
                    }
                }
            }
        }
        ops
    }

    /// The `components.schemas` mapping in document order.
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
    }

    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.schemas().and_then(|s| s.get(name))
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.schema(name).is_some()
    }

    /// The `components.securitySchemes` mapping.
    pub fn security_schemes(&self) -> Option<&Map<String, Value>> {
        self.root
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_object)
    }

    /// Whether the document declares a root-level security requirement.
    pub fn has_root_security(&self) -> bool {
        self.root.get("security").is_some_and(truthy)
    }

    /// The raw root-level vendor extension block for `key`, when present.
    pub fn vendor(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Typed root backend configuration, `None` when the block is absent.
    pub fn backend_config(&self) -> Option<BackendConfig> {
        self.vendor("x-go-zero").map(parse_ext)
    }

    /// Root frontend cache directives forwarded to the server-actions
    /// generator, when present.
    pub fn frontend_cache(&self) -> Option<&Value> {
        self.vendor("x-frontend").and_then(|v| v.get("cache"))
    }

    /// Declared websocket channels as `(path, config)` in document order.
    pub fn websockets(&self) -> Vec<(String, WebSocketConfig)> {
        let mut channels = Vec::new();
        if let Some(block) = self.vendor("x-websocket").and_then(Value::as_object) {
            for (path, cfg) in block {
                channels.push((path.clone(), parse_ext(cfg)));
            }
        }
        channels
    }

    /// Every distinct `$ref` target in the document, first occurrence order.
    ///
    /// The walk is structural: any object carrying a `$ref` key contributes,
    /// no matter where it sits in the tree. The cross-reference pass compares
    /// this list against `components.schemas`.
    pub fn collect_schema_refs(&self) -> Vec<SchemaRef> {
        let mut seen = HashSet::new();
        let mut refs = Vec::new();
        collect_refs(&self.root, &mut seen, &mut refs);
        refs
    }
}

fn collect_refs(value: &Value, seen: &mut HashSet<String>, refs: &mut Vec<SchemaRef>) {
    match value {
        Value::Object(obj) => {
            if let Some(path) = obj.get("$ref").and_then(Value::as_str) {
                if let Some(schema_ref) = SchemaRef::parse(path) {
                    if seen.insert(schema_ref.name().to_string()) {
                        refs.push(schema_ref);
                    }
                }
            }
            for v in obj.values() {
                collect_refs(v, seen, refs);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_refs(v, seen, refs);
            }
        }
        _ => {}
    }
}
