use serde_json::Value;

use super::document::{Document, SchemaRef};
use super::ext::{parse_ext, BackendFieldConfig, ValidationHints};
use crate::typemap::TypeDesc;

/// Name of the synthetic property recording an `allOf` parent. Emitted for
/// schema composition, never as a literal field.
pub const EXTENDS_FIELD: &str = "_extends";

/// A named schema with its extracted properties, document order preserved.
#[derive(Debug, Clone)]
pub struct SchemaDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeDesc,
    pub optional: bool,
    pub backend: BackendFieldConfig,
    pub validation: ValidationHints,
}

impl PropertyDef {
    /// Whether this entry is a synthetic `allOf` parent reference.
    pub fn is_extends(&self) -> bool {
        self.name == EXTENDS_FIELD
    }

    /// Go struct tag, defaulting to a plain json tag on the property name.
    pub fn json_tag(&self) -> String {
        match self.backend.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => format!("json:\"{}\"", self.name),
        }
    }

    /// Backend validation rule, empty when none was declared.
    pub fn validate_rule(&self) -> &str {
        match self.backend.validate.as_deref() {
            Some(rule) if !rule.is_empty() => rule,
            _ => "",
        }
    }
}

/// Extract every schema under `components.schemas`.
///
/// Regular properties come first in declaration order. `allOf` parents are
/// appended after them as synthetic [`EXTENDS_FIELD`] entries, one per
/// referenced parent; inline `allOf` members without a `$ref` contribute
/// nothing. Schemas without properties extract as empty.
pub fn extract_schemas(doc: &Document) -> Vec<SchemaDef> {
    let mut out = Vec::new();
    let Some(schemas) = doc.schemas() else {
        return out;
    };
    for (name, schema) in schemas {
        let mut properties = Vec::new();
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            let required = schema.get("required").and_then(Value::as_array);
            for (prop_name, prop_schema) in props {
                let is_required = required
                    .is_some_and(|r| r.iter().any(|v| v.as_str() == Some(prop_name.as_str())));
                properties.push(PropertyDef {
                    name: prop_name.clone(),
                    ty: TypeDesc::from_schema(prop_schema),
                    optional: !is_required,
                    backend: prop_schema
                        .get("x-go-zero")
                        .map(parse_ext)
                        .unwrap_or_default(),
                    validation: prop_schema
                        .get("x-validation")
                        .map(parse_ext)
                        .unwrap_or_default(),
                });
            }
        }
        if let Some(all_of) = schema.get("allOf").and_then(Value::as_array) {
            for item in all_of {
                if let Some(ref_path) = item.get("$ref").and_then(Value::as_str) {
                    if let Some(parent) = SchemaRef::parse(ref_path) {
                        properties.push(PropertyDef {
                            name: EXTENDS_FIELD.to_string(),
                            ty: TypeDesc::Reference(parent),
                            optional: false,
                            backend: BackendFieldConfig::default(),
                            validation: ValidationHints::default(),
                        });
                    }
                }
            }
        }
        out.push(SchemaDef {
            name: name.clone(),
            properties,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(schemas: Value) -> Document {
        Document::from_value(json!({ "components": { "schemas": schemas } }))
    }

    #[test]
    fn test_required_controls_optionality() {
        let schemas = extract_schemas(&doc(json!({
            "User": {
                "type": "object",
                "required": ["id", "name"],
                "properties": {
                    "id": { "type": "string", "format": "uuid" },
                    "name": { "type": "string" },
                    "email": { "type": "string", "format": "email" }
                }
            }
        })));
        assert_eq!(schemas.len(), 1);
        let user = &schemas[0];
        assert_eq!(user.name, "User");
        let names: Vec<_> = user.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "email"]);
        assert!(!user.properties[0].optional);
        assert!(!user.properties[1].optional);
        assert!(user.properties[2].optional);
    }

    #[test]
    fn test_all_of_parent_appended_last() {
        let schemas = extract_schemas(&doc(json!({
            "User": {
                "type": "object",
                "properties": { "id": { "type": "string" } }
            },
            "Admin": {
                "allOf": [{ "$ref": "#/components/schemas/User" }],
                "properties": { "level": { "type": "integer" } }
            }
        })));
        let admin = &schemas[1];
        assert_eq!(admin.name, "Admin");
        assert_eq!(admin.properties.len(), 2);
        assert_eq!(admin.properties[0].name, "level");
        assert!(admin.properties[1].is_extends());
        assert!(!admin.properties[1].optional);
        assert_eq!(admin.properties[1].ty.ts_type(), "User");
        assert_eq!(admin.properties[1].ty.zod_expr(), "UserSchema");
    }

    #[test]
    fn test_inline_all_of_members_ignored() {
        let schemas = extract_schemas(&doc(json!({
            "Admin": {
                "allOf": [
                    { "type": "object", "properties": { "x": { "type": "string" } } },
                    { "$ref": "#/components/schemas/User" }
                ]
            }
        })));
        assert_eq!(schemas[0].properties.len(), 1);
        assert!(schemas[0].properties[0].is_extends());
    }

    #[test]
    fn test_json_tag_override() {
        let schemas = extract_schemas(&doc(json!({
            "User": {
                "properties": {
                    "userId": { "type": "string", "x-go-zero": { "tag": "json:\"user_id\"", "validate": "required" } },
                    "name": { "type": "string" }
                }
            }
        })));
        let props = &schemas[0].properties;
        assert_eq!(props[0].json_tag(), "json:\"user_id\"");
        assert_eq!(props[0].validate_rule(), "required");
        assert_eq!(props[1].json_tag(), "json:\"name\"");
        assert_eq!(props[1].validate_rule(), "");
    }

    #[test]
    fn test_schema_without_properties_extracts_empty() {
        let schemas = extract_schemas(&doc(json!({ "Empty": { "type": "object" } })));
        assert!(schemas[0].properties.is_empty());
    }
}
