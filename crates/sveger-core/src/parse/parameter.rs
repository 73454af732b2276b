use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::schema::{Schema, TypeSet};

/// Parameter location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    /// Swagger 2 request payload.
    Body,
    /// Swagger 2 form field.
    FormData,
    #[serde(other)]
    Other,
}

/// An API parameter.
///
/// OpenAPI 3 describes the value with `schema`; Swagger 2 puts `type`, `format`,
/// `items` and `enum` directly on the parameter (except for `in: body`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Parameter {
    /// The schema describing this parameter's value, whichever dialect produced it.
    ///
    /// Swagger 2 direct type fields are lifted into an equivalent schema so the
    /// resolver never branches on dialect.
    pub fn effective_schema(&self) -> Option<Cow<'_, Schema>> {
        if let Some(ref schema) = self.schema {
            return Some(Cow::Borrowed(schema));
        }
        self.param_type.as_ref()?;
        Some(Cow::Owned(Schema {
            schema_type: self.param_type.clone(),
            format: self.format.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            description: self.description.clone(),
            ..Schema::default()
        }))
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}
