//! Total mapping from schema fragments to target-language type expressions.
//!
//! Every fragment maps to something: unrecognized or missing `type` values
//! land on the platform's escape hatch (`interface{}`, `any`, `z.unknown()`)
//! rather than failing, so one odd schema never sinks a generation run.

use serde_json::{Number, Value};

use crate::spec::SchemaRef;

/// Normalized shape of a schema fragment, carrying just the facets the
/// per-platform emitters read.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    String {
        format: Option<String>,
        min_length: Option<u64>,
        max_length: Option<u64>,
    },
    Integer {
        minimum: Option<Number>,
        maximum: Option<Number>,
    },
    Number {
        minimum: Option<Number>,
        maximum: Option<Number>,
    },
    Boolean,
    Array {
        items: Option<Box<TypeDesc>>,
    },
    Object,
    Reference(SchemaRef),
    Unknown,
}

impl TypeDesc {
    /// Normalize a raw schema fragment. A `$ref` wins over any inline
    /// `type`; a zero `minLength`/`maxLength` is treated as unset.
    pub fn from_schema(schema: &Value) -> TypeDesc {
        if let Some(ref_path) = schema.get("$ref").and_then(Value::as_str) {
            if let Some(schema_ref) = SchemaRef::parse(ref_path) {
                return TypeDesc::Reference(schema_ref);
            }
        }
        match schema.get("type").and_then(Value::as_str) {
            Some("string") => TypeDesc::String {
                format: schema
                    .get("format")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                min_length: schema
                    .get("minLength")
                    .and_then(Value::as_u64)
                    .filter(|n| *n > 0),
                max_length: schema
                    .get("maxLength")
                    .and_then(Value::as_u64)
                    .filter(|n| *n > 0),
            },
            Some("integer") => TypeDesc::Integer {
                minimum: schema.get("minimum").and_then(Value::as_number).cloned(),
                maximum: schema.get("maximum").and_then(Value::as_number).cloned(),
            },
            Some("number") => TypeDesc::Number {
                minimum: schema.get("minimum").and_then(Value::as_number).cloned(),
                maximum: schema.get("maximum").and_then(Value::as_number).cloned(),
            },
            Some("boolean") => TypeDesc::Boolean,
            Some("array") => TypeDesc::Array {
                items: schema
                    .get("items")
                    .map(|items| Box::new(TypeDesc::from_schema(items))),
            },
            Some("object") => TypeDesc::Object,
            _ => TypeDesc::Unknown,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, TypeDesc::Reference(_))
    }

    /// Go type expression for the backend generator. References become
    /// pointers to the named struct.
    pub fn go_type(&self) -> String {
        match self {
            TypeDesc::Reference(r) => format!("*{}", r.name()),
            TypeDesc::String { .. } => "string".to_string(),
            TypeDesc::Integer { .. } => "int64".to_string(),
            TypeDesc::Number { .. } => "float64".to_string(),
            TypeDesc::Boolean => "bool".to_string(),
            TypeDesc::Array { items } => match items {
                Some(inner) => format!("[]{}", inner.go_type()),
                None => "[]interface{}".to_string(),
            },
            TypeDesc::Object => "map[string]interface{}".to_string(),
            TypeDesc::Unknown => "interface{}".to_string(),
        }
    }

    /// TypeScript type expression, shared by the frontend and mobile
    /// generators.
    pub fn ts_type(&self) -> String {
        match self {
            TypeDesc::Reference(r) => r.name().to_string(),
            TypeDesc::String { .. } => "string".to_string(),
            TypeDesc::Integer { .. } | TypeDesc::Number { .. } => "number".to_string(),
            TypeDesc::Boolean => "boolean".to_string(),
            TypeDesc::Array { items } => match items {
                Some(inner) => format!("{}[]", inner.ts_type()),
                None => "any[]".to_string(),
            },
            TypeDesc::Object => "Record<string, any>".to_string(),
            TypeDesc::Unknown => "any".to_string(),
        }
    }

    /// Zod validator expression for the frontend generator. References
    /// point at the sibling `<Name>Schema` validator; string formats map to
    /// the matching refinement.
    pub fn zod_expr(&self) -> String {
        match self {
            TypeDesc::Reference(r) => format!("{}Schema", r.name()),
            TypeDesc::String {
                format,
                min_length,
                max_length,
            } => {
                let mut expr = String::from("z.string()");
                match format.as_deref() {
                    Some("email") => expr.push_str(".email()"),
                    Some("uuid") => expr.push_str(".uuid()"),
                    Some("uri") => expr.push_str(".url()"),
                    Some("date-time") => expr.push_str(".datetime()"),
                    _ => {}
                }
                if let Some(n) = min_length {
                    expr.push_str(&format!(".min({n})"));
                }
                if let Some(n) = max_length {
                    expr.push_str(&format!(".max({n})"));
                }
                expr
            }
            TypeDesc::Integer { minimum, maximum } => {
                let mut expr = String::from("z.number().int()");
                if let Some(n) = minimum {
                    expr.push_str(&format!(".min({n})"));
                }
                if let Some(n) = maximum {
                    expr.push_str(&format!(".max({n})"));
                }
                expr
            }
            TypeDesc::Number { minimum, maximum } => {
                let mut expr = String::from("z.number()");
                if let Some(n) = minimum {
                    expr.push_str(&format!(".min({n})"));
                }
                if let Some(n) = maximum {
                    expr.push_str(&format!(".max({n})"));
                }
                expr
            }
            TypeDesc::Boolean => "z.boolean()".to_string(),
            TypeDesc::Array { items } => match items {
                Some(inner) => format!("z.array({})", inner.zod_expr()),
                None => "z.array(z.unknown())".to_string(),
            },
            TypeDesc::Object => "z.object({})".to_string(),
            TypeDesc::Unknown => "z.unknown()".to_string(),
        }
    }
}

/// TypeScript type for an optional schema fragment, `any` when absent.
/// Parameter declarations use this since parameters may omit their schema.
pub fn ts_type_of(schema: Option<&Value>) -> String {
    match schema {
        Some(s) => TypeDesc::from_schema(s).ts_type(),
        None => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_go_types() {
        let cases = [
            (json!({ "type": "string" }), "string"),
            (json!({ "type": "integer" }), "int64"),
            (json!({ "type": "number" }), "float64"),
            (json!({ "type": "boolean" }), "bool"),
            (json!({ "type": "object" }), "map[string]interface{}"),
            (json!({ "type": "array" }), "[]interface{}"),
            (
                json!({ "type": "array", "items": { "type": "string" } }),
                "[]string",
            ),
            (json!({ "$ref": "#/components/schemas/User" }), "*User"),
            (json!({}), "interface{}"),
            (json!({ "type": "file" }), "interface{}"),
        ];
        for (schema, expected) in cases {
            assert_eq!(TypeDesc::from_schema(&schema).go_type(), expected);
        }
    }

    #[test]
    fn test_ts_types() {
        let cases = [
            (json!({ "type": "string" }), "string"),
            (json!({ "type": "integer" }), "number"),
            (json!({ "type": "number" }), "number"),
            (json!({ "type": "boolean" }), "boolean"),
            (json!({ "type": "object" }), "Record<string, any>"),
            (json!({ "type": "array" }), "any[]"),
            (
                json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } }),
                "User[]",
            ),
            (json!({ "$ref": "#/components/schemas/User" }), "User"),
            (json!({}), "any"),
        ];
        for (schema, expected) in cases {
            assert_eq!(TypeDesc::from_schema(&schema).ts_type(), expected);
        }
        assert_eq!(ts_type_of(None), "any");
    }

    #[test]
    fn test_zod_string_formats() {
        let cases = [
            (json!({ "type": "string" }), "z.string()"),
            (
                json!({ "type": "string", "format": "email" }),
                "z.string().email()",
            ),
            (
                json!({ "type": "string", "format": "uuid" }),
                "z.string().uuid()",
            ),
            (
                json!({ "type": "string", "format": "uri" }),
                "z.string().url()",
            ),
            (
                json!({ "type": "string", "format": "date-time" }),
                "z.string().datetime()",
            ),
            (
                json!({ "type": "string", "minLength": 1, "maxLength": 64 }),
                "z.string().min(1).max(64)",
            ),
        ];
        for (schema, expected) in cases {
            assert_eq!(TypeDesc::from_schema(&schema).zod_expr(), expected);
        }
    }

    #[test]
    fn test_zod_zero_min_length_is_unset() {
        let schema = json!({ "type": "string", "minLength": 0 });
        assert_eq!(TypeDesc::from_schema(&schema).zod_expr(), "z.string()");
    }

    #[test]
    fn test_zod_zero_minimum_is_kept() {
        let schema = json!({ "type": "integer", "minimum": 0, "maximum": 100 });
        assert_eq!(
            TypeDesc::from_schema(&schema).zod_expr(),
            "z.number().int().min(0).max(100)"
        );
    }

    #[test]
    fn test_zod_compound() {
        let cases = [
            (json!({ "type": "boolean" }), "z.boolean()"),
            (json!({ "type": "object" }), "z.object({})"),
            (json!({ "type": "array" }), "z.array(z.unknown())"),
            (
                json!({ "type": "array", "items": { "type": "integer" } }),
                "z.array(z.number().int())",
            ),
            (
                json!({ "$ref": "#/components/schemas/Role" }),
                "RoleSchema",
            ),
            (json!({}), "z.unknown()"),
        ];
        for (schema, expected) in cases {
            assert_eq!(TypeDesc::from_schema(&schema).zod_expr(), expected);
        }
    }
}
