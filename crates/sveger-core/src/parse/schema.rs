use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Anything else (`file` in Swagger 2, vendor types). Resolves as dynamic.
    #[serde(other)]
    Other,
}

/// The `type` field can be a single type or an array of types (3.1 style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The first non-null member of the set.
    pub fn primary(&self) -> Option<&SchemaType> {
        match self {
            TypeSet::Single(t) => Some(t),
            TypeSet::Multiple(types) => types.iter().find(|t| **t != SchemaType::Null),
        }
    }
}

/// A schema node shared by both dialects.
///
/// Reference and definition are mutually exclusive in well-formed input: when
/// `ref_path` is set, every other field is ignored by the resolver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    /// Symbolic names parallel to `enum_values`.
    #[serde(
        rename = "x-enum-varnames",
        alias = "x-enumNames",
        alias = "enumNames",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enum_names: Vec<String>,
}

impl Schema {
    /// The non-empty `$ref` target, if any.
    pub fn reference(&self) -> Option<&str> {
        self.ref_path.as_deref().filter(|r| !r.is_empty())
    }

    pub fn primary_type(&self) -> Option<&SchemaType> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    /// Nested schemas of every composition keyword, in `allOf`, `oneOf`, `anyOf` order.
    pub fn compositions(&self) -> impl Iterator<Item = &Schema> {
        self.all_of
            .iter()
            .chain(self.one_of.iter())
            .chain(self.any_of.iter())
    }
}
