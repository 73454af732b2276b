use indexmap::IndexMap;

use crate::ir::{EnumMember, PrimitiveKind, PropertyShape, RefScope, TypeShape};
use crate::parse::SchemaMap;
use crate::parse::reference::local_ref_name;
use crate::parse::schema::{Schema, SchemaType};

use super::name_normalizer::sanitize_type_name;

/// Everything a resolution call may consult besides the schema itself.
///
/// Borrowed from the document for the duration of a run; never global.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub schemas: &'a SchemaMap,
    pub scope: RefScope,
}

impl<'a> ResolveContext<'a> {
    pub fn new(schemas: &'a SchemaMap, scope: RefScope) -> Self {
        Self { schemas, scope }
    }

    /// Context for a usage site (operation signatures).
    pub fn usage(schemas: &'a SchemaMap) -> Self {
        Self::new(schemas, RefScope::Usage)
    }

    /// Context for a definitions file.
    pub fn definitions(schemas: &'a SchemaMap) -> Self {
        Self::new(schemas, RefScope::Definition)
    }
}

/// Resolve a schema node into its canonical `TypeShape`.
///
/// First match wins: reference, array, enum, object, primitive. Anything else
/// degrades to `Unresolved`. References are not followed, so the walk is
/// bounded by the depth of the (finite) input tree.
pub fn resolve(schema: &Schema, ctx: &ResolveContext<'_>) -> TypeShape {
    if let Some(ref_path) = schema.reference() {
        return resolve_reference(ref_path, ctx);
    }

    let primary = schema.primary_type();

    if primary == Some(&SchemaType::Array) {
        let item = schema
            .items
            .as_deref()
            .map(|items| resolve(items, ctx))
            .unwrap_or(TypeShape::Unresolved);
        return TypeShape::array(item);
    }

    if !schema.enum_values.is_empty() {
        return resolve_enum(schema);
    }

    if primary == Some(&SchemaType::Object) || !schema.properties.is_empty() {
        return resolve_object(schema, ctx);
    }

    match primary {
        Some(SchemaType::String) => TypeShape::Primitive(PrimitiveKind::String),
        Some(SchemaType::Number | SchemaType::Integer) => {
            TypeShape::Primitive(PrimitiveKind::Number)
        }
        Some(SchemaType::Boolean) => TypeShape::Primitive(PrimitiveKind::Boolean),
        other => {
            log::debug!("schema with type {other:?} matched no known shape, using dynamic type");
            TypeShape::Unresolved
        }
    }
}

fn resolve_reference(ref_path: &str, ctx: &ResolveContext<'_>) -> TypeShape {
    match local_ref_name(ref_path) {
        Some(name) => {
            if !ctx.schemas.contains_key(&name) {
                log::debug!("reference {ref_path} points at an undeclared schema");
            }
            TypeShape::reference(sanitize_type_name(&name), ctx.scope)
        }
        None => {
            log::warn!("only same-document references are supported, ignoring {ref_path}");
            TypeShape::Unresolved
        }
    }
}

fn resolve_enum(schema: &Schema) -> TypeShape {
    let named = schema.enum_names.len() == schema.enum_values.len();
    let members = schema
        .enum_values
        .iter()
        .enumerate()
        .map(|(i, value)| EnumMember {
            name: named.then(|| schema.enum_names[i].clone()),
            literal: literal_text(value),
        })
        .collect();
    TypeShape::Enum(members)
}

/// Plain text of an enum literal: strings unquoted, everything else as JSON.
fn literal_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn resolve_object(schema: &Schema, ctx: &ResolveContext<'_>) -> TypeShape {
    let properties: IndexMap<String, PropertyShape> = schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let optional = !schema.required.contains(name);
            (
                name.clone(),
                PropertyShape {
                    shape: resolve(prop, ctx),
                    optional,
                },
            )
        })
        .collect();
    TypeShape::Object(properties)
}
