use sveger_core::ir::{PrimitiveKind, RefScope, TypeShape};

/// Namespace usage sites import the types barrel under.
pub const TYPES_NAMESPACE: &str = "Types";

/// Map a `TypeShape` to its TypeScript type expression.
///
/// Usage-scoped references are qualified with the types namespace; definition-
/// scoped ones are bare. Object properties are sorted by name.
pub fn shape_to_ts(shape: &TypeShape) -> String {
    match shape {
        TypeShape::Reference(r) => match r.scope {
            RefScope::Usage => format!("{TYPES_NAMESPACE}.{}", r.name),
            RefScope::Definition => r.name.clone(),
        },
        TypeShape::Array(inner) => {
            let inner_ts = shape_to_ts(inner);
            if inner_ts.contains('|') {
                format!("({inner_ts})[]")
            } else {
                format!("{inner_ts}[]")
            }
        }
        TypeShape::Primitive(kind) => primitive_to_ts(*kind).to_string(),
        TypeShape::Object(props) => {
            if props.is_empty() {
                return "Record<string, any>".to_string();
            }
            let mut names: Vec<&String> = props.keys().collect();
            names.sort();
            let fields: Vec<String> = names
                .into_iter()
                .map(|name| {
                    let prop = &props[name];
                    let marker = if prop.optional { "?" } else { "" };
                    format!("{}{marker}: {}", property_key(name), shape_to_ts(&prop.shape))
                })
                .collect();
            format!("{{ {} }}", fields.join("; "))
        }
        TypeShape::Enum(members) => {
            if members.is_empty() {
                return "never".to_string();
            }
            members
                .iter()
                .map(|m| string_literal(&m.literal))
                .collect::<Vec<_>>()
                .join(" | ")
        }
        TypeShape::Unresolved => "any".to_string(),
    }
}

pub fn primitive_to_ts(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Number => "number",
        PrimitiveKind::Boolean => "boolean",
    }
}

/// `true` if `name` can be written unquoted as a TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An object key, quoted when it is not a plain identifier (`"x-trace-id"`).
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// A double-quoted, escaped TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
