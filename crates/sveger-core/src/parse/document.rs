use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::PathItem;
use super::parameter::Parameter;
use super::reference::local_ref_name;
use super::schema::Schema;
use super::server::{self, Server};
use crate::error::LoadError;

/// Named schemas of a document, merged from both dialects' containers.
pub type SchemaMap = IndexMap<String, Schema>;

/// Which input dialect produced a [`Document`]. Kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    OpenApi3,
    Swagger2,
}

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,
}

/// The wire shape of either dialect. Never leaves this module.
#[derive(Debug, Deserialize)]
struct RawDocument {
    openapi: Option<String>,
    swagger: Option<String>,
    #[serde(default)]
    info: Info,
    #[serde(default)]
    servers: Vec<Server>,
    host: Option<String>,
    #[serde(rename = "basePath")]
    base_path: Option<String>,
    #[serde(default)]
    schemes: Vec<String>,
    #[serde(default)]
    paths: IndexMap<String, PathItem>,
    components: Option<Components>,
    #[serde(default)]
    definitions: IndexMap<String, Schema>,
    #[serde(default)]
    parameters: IndexMap<String, Parameter>,
}

/// A parsed API description, independent of the dialect it was written in.
///
/// Created once per run and never mutated afterwards; every downstream
/// component borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub dialect: Dialect,
    pub version: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub schemas: SchemaMap,
    pub parameters: IndexMap<String, Parameter>,
}

impl Document {
    /// Look up a reusable parameter by its local `$ref`.
    pub fn parameter(&self, ref_path: &str) -> Option<&Parameter> {
        local_ref_name(ref_path).and_then(|name| self.parameters.get(&name))
    }

    /// Look up a named schema by its local `$ref`.
    pub fn schema(&self, ref_path: &str) -> Option<&Schema> {
        local_ref_name(ref_path).and_then(|name| self.schemas.get(&name))
    }
}

impl TryFrom<RawDocument> for Document {
    type Error = LoadError;

    fn try_from(raw: RawDocument) -> Result<Self, LoadError> {
        let (dialect, version) = match (raw.openapi, raw.swagger) {
            (Some(v), _) if v.starts_with("3.") => (Dialect::OpenApi3, v),
            (None, Some(v)) if v.starts_with("2.") => (Dialect::Swagger2, v),
            (Some(v), _) | (None, Some(v)) => return Err(LoadError::UnsupportedVersion(v)),
            (None, None) => return Err(LoadError::MissingVersion),
        };

        let components = raw.components.unwrap_or_default();

        let mut schemas = components.schemas;
        schemas.extend(raw.definitions);

        let mut parameters = components.parameters;
        parameters.extend(raw.parameters);

        let servers = if raw.servers.is_empty() {
            server::from_swagger_host(&raw.schemes, raw.host.as_deref(), raw.base_path.as_deref())
                .into_iter()
                .collect()
        } else {
            raw.servers
        };

        Ok(Document {
            dialect,
            version,
            info: raw.info,
            servers,
            paths: raw.paths,
            schemas,
            parameters,
        })
    }
}

pub(super) fn from_raw_yaml(input: &[u8]) -> Result<Document, LoadError> {
    let raw: RawDocument = serde_yaml_ng::from_slice(input)?;
    Document::try_from(raw)
}

pub(super) fn from_raw_json(input: &[u8]) -> Result<Document, LoadError> {
    let raw: RawDocument = serde_json::from_slice(input)?;
    Document::try_from(raw)
}
