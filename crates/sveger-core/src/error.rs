use thiserror::Error;

/// Failure to turn raw input into a [`Document`](crate::parse::Document).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported API description version: {0}")]
    UnsupportedVersion(String),

    #[error("missing version field: expected `openapi` (3.x) or `swagger` (2.x)")]
    MissingVersion,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid auth mode `{0}` (expected bearer, apikey, basic, or none)")]
    InvalidAuthMode(String),
}
