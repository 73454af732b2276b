use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub kebab_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Where a reference is going to be rendered.
///
/// A definitions file names a sibling type bare (`Pet`); a usage site names it
/// through the types namespace (`Types.Pet`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefScope {
    Definition,
    Usage,
}

/// A reference to a named schema, by its sanitized name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub name: String,
    pub scope: RefScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    /// Both `number` and `integer`.
    Number,
    Boolean,
}

/// An object property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyShape {
    pub shape: TypeShape,
    pub optional: bool,
}

/// One member of an enum: the literal, and its symbolic name when the input
/// supplied a complete parallel name list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub literal: String,
}

/// The canonical, dialect-independent type of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    Reference(TypeRef),
    Array(Box<TypeShape>),
    Primitive(PrimitiveKind),
    /// Properties in the schema's insertion order. Not sorted here.
    Object(IndexMap<String, PropertyShape>),
    Enum(Vec<EnumMember>),
    /// Dynamic type: the schema matched no recognized shape.
    Unresolved,
}

impl TypeShape {
    pub fn reference(name: impl Into<String>, scope: RefScope) -> Self {
        TypeShape::Reference(TypeRef {
            name: name.into(),
            scope,
        })
    }

    pub fn array(item: TypeShape) -> Self {
        TypeShape::Array(Box::new(item))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, TypeShape::Unresolved)
    }

    /// `true` for enums whose every member carries a symbolic name.
    pub fn is_named_enum(&self) -> bool {
        match self {
            TypeShape::Enum(members) => {
                !members.is_empty() && members.iter().all(|m| m.name.is_some())
            }
            _ => false,
        }
    }
}
