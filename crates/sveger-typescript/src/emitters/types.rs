use std::collections::BTreeSet;

use minijinja::{Environment, context};
use serde::Serialize;
use sveger_core::GeneratedFile;
use sveger_core::ir::{Resource, TypeShape};

use super::{render_file, resource_dir};
use crate::type_mapper::{property_key, shape_to_ts, string_literal};

/// Emit `types/common.types.ts`.
pub fn emit_common_types(env: &Environment<'_>) -> Result<GeneratedFile, minijinja::Error> {
    render_file(
        env,
        "types/common.types.ts.j2",
        "types/common.types.ts",
        context! {},
    )
}

/// Emit `types/<resource>.types.ts`, or nothing if the resource reaches no named types.
pub fn emit_resource_types(
    env: &Environment<'_>,
    resource: &Resource,
) -> Result<Option<GeneratedFile>, minijinja::Error> {
    if resource.types.is_empty() {
        return Ok(None);
    }
    let declarations: Vec<Declaration> = resource
        .types
        .iter()
        .map(|(name, shape)| Declaration::new(name, shape))
        .collect();

    render_file(
        env,
        "types/resource.types.ts.j2",
        format!("types/{}.types.ts", resource_dir(resource)),
        context! {
            resource => resource.name.original.clone(),
            declarations => declarations,
        },
    )
    .map(Some)
}

/// Emit `types/index.ts`.
///
/// A type reachable from several resources is declared in each of their files
/// but re-exported once, from the first resource in sorted order.
pub fn emit_types_index(
    env: &Environment<'_>,
    resources: &[Resource],
) -> Result<GeneratedFile, minijinja::Error> {
    let mut exported = BTreeSet::new();
    let mut modules = Vec::new();

    for resource in resources {
        let exports: Vec<String> = resource
            .types
            .iter()
            .filter(|(name, _)| exported.insert(name.as_str()))
            .map(|(name, shape)| {
                if shape.is_named_enum() {
                    name.clone()
                } else {
                    format!("type {name}")
                }
            })
            .collect();
        if !exports.is_empty() {
            modules.push(context! {
                file => format!("{}.types", resource_dir(resource)),
                exports => exports,
            });
        }
    }

    render_file(
        env,
        "types/index.ts.j2",
        "types/index.ts",
        context! { modules => modules },
    )
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Declaration {
    Interface { name: String, fields: Vec<Field> },
    Enum { name: String, members: Vec<Member> },
    Alias { name: String, target: String },
}

#[derive(Debug, Serialize)]
struct Field {
    key: String,
    optional: bool,
    #[serde(rename = "type")]
    ts_type: String,
}

#[derive(Debug, Serialize)]
struct Member {
    name: String,
    value: String,
}

impl Declaration {
    fn new(name: &str, shape: &TypeShape) -> Self {
        let name = name.to_string();
        match shape {
            TypeShape::Object(props) if !props.is_empty() => {
                // Sorted by raw name, as in inline object types.
                let mut keys: Vec<&String> = props.keys().collect();
                keys.sort();
                let fields = keys
                    .into_iter()
                    .map(|key| Field {
                        key: property_key(key),
                        optional: props[key].optional,
                        ts_type: shape_to_ts(&props[key].shape),
                    })
                    .collect();
                Declaration::Interface { name, fields }
            }
            TypeShape::Enum(members) if shape.is_named_enum() => Declaration::Enum {
                name,
                members: members
                    .iter()
                    .map(|m| Member {
                        name: property_key(m.name.as_deref().unwrap_or(&m.literal)),
                        value: string_literal(&m.literal),
                    })
                    .collect(),
            },
            other => Declaration::Alias {
                name,
                target: shape_to_ts(other),
            },
        }
    }
}
