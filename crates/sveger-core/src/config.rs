use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ir::AuthMode;
use crate::transform::{InferenceOptions, ModelOptions};

/// Project configuration loaded from `.sveger.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SvegerConfig {
    pub input: String,
    pub output: String,
    pub client: ClientConfig,
    /// Schema namespace markers never picked as a return type (`pkg`, `fiber`).
    pub opaque_namespaces: Vec<String>,
}

impl Default for SvegerConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "generated".to_string(),
            client: ClientConfig::default(),
            opaque_namespaces: InferenceOptions::default().opaque_namespaces,
        }
    }
}

/// Connection settings baked into the generated client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout: Option<u64>,
    pub auth: String,
    pub interceptors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            auth: AuthMode::default().as_str().to_string(),
            interceptors: false,
        }
    }
}

impl SvegerConfig {
    pub fn model_options(&self) -> Result<ModelOptions, ConfigError> {
        Ok(ModelOptions {
            base_url: self.client.base_url.clone(),
            timeout_ms: self.client.timeout,
            auth: parse_auth_mode(&self.client.auth)?,
            with_interceptors: self.client.interceptors,
            inference: InferenceOptions {
                opaque_namespaces: self.opaque_namespaces.clone(),
            },
        })
    }
}

/// Parse an auth mode name, case-insensitively.
pub fn parse_auth_mode(value: &str) -> Result<AuthMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "bearer" => Ok(AuthMode::Bearer),
        "apikey" | "api_key" | "api-key" => Ok(AuthMode::ApiKey),
        "basic" => Ok(AuthMode::Basic),
        "none" => Ok(AuthMode::None),
        _ => Err(ConfigError::InvalidAuthMode(value.to_string())),
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".sveger.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SvegerConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# sveger configuration
input: swagger.yaml
output: generated

client:
  # base_url: https://api.example.com   # defaults to the first server in the document
  # timeout: 10000                       # milliseconds
  auth: bearer          # bearer | apikey | basic | none
  interceptors: false   # request/response interceptors in axios.config.ts

# Schema namespaces that are never chosen as an operation's return type
opaque_namespaces:
  - pkg
  - fiber
"#
}
