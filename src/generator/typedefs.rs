use crate::spec::SchemaDef;

/// Render the `types.ts` artifact: one exported interface per schema, in
/// document order. Synthetic `allOf` parent entries never appear as literal
/// fields, so they are skipped here.
pub fn render_types(schemas: &[SchemaDef], header: &str) -> String {
    let mut out = String::from(header);
    for schema in schemas {
        out.push_str(&format!("export interface {} {{\n", schema.name));
        for prop in &schema.properties {
            if prop.is_extends() {
                continue;
            }
            let marker = if prop.optional { "?" } else { "" };
            out.push_str(&format!(
                "  {}{}: {};\n",
                prop.name,
                marker,
                prop.ty.ts_type()
            ));
        }
        out.push_str("}\n\n");
    }
    out
}
