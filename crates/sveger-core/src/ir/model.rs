use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::operations::MethodDef;
use super::types::{NormalizedName, TypeShape};

/// How generated clients authenticate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Bearer,
    ApiKey,
    Basic,
    None,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Bearer => "bearer",
            AuthMode::ApiKey => "apikey",
            AuthMode::Basic => "basic",
            AuthMode::None => "none",
        }
    }
}

/// Connection boilerplate handed to the emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub auth: AuthMode,
    pub with_interceptors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations grouped under one tag or path prefix, with every named type they reach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// First-seen casing, e.g. `Pets`.
    pub name: NormalizedName,
    /// Lower-cased grouping key, e.g. `pets`.
    pub key: String,
    pub methods: Vec<MethodDef>,
    /// Sanitized type name → definition-scoped shape, sorted by name.
    pub types: BTreeMap<String, TypeShape>,
}

/// The whole client model produced from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientModel {
    pub info: ApiInfo,
    pub connection: ConnectionConfig,
    /// Sorted by `key`.
    pub resources: Vec<Resource>,
}

impl ClientModel {
    /// Resource keys in sorted order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.key.as_str()).collect()
    }

    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(key))
    }
}
