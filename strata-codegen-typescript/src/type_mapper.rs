//! TypeScript type mapper implementation.

use strata_codegen::language::TypeMapper;
use strata_ir::FieldKind;

/// TypeScript type mapper implementation.
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn map_kind(&self, kind: &FieldKind) -> String {
        match kind {
            FieldKind::String => "string".to_string(),
            FieldKind::Integer => "number".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::Enum(members) => members
                .iter()
                .map(|m| format!("{:?}", m))
                .collect::<Vec<_>>()
                .join(" | "),
            FieldKind::Array(element) => match element.as_ref() {
                // `"A" | "B"[]` would bind the brackets to the last member
                FieldKind::Enum(members) if members.len() > 1 => {
                    format!("({})[]", self.map_kind(element))
                }
                _ => format!("{}[]", self.map_kind(element)),
            },
        }
    }
}
