use crate::ir::{ApiInfo, AuthMode, ClientModel, ConnectionConfig};
use crate::parse::Document;

use super::operation_classifier::classify;
use super::partitioner::partition;
use super::return_type::InferenceOptions;

pub const DEFAULT_BASE_URL: &str = "https://api.example.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Knobs for turning a document into a client model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOptions {
    /// Overrides the document's servers.
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub auth: AuthMode,
    pub with_interceptors: bool,
    pub inference: InferenceOptions,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: None,
            auth: AuthMode::default(),
            with_interceptors: false,
            inference: InferenceOptions::default(),
        }
    }
}

/// Build the full client model for a normalized document.
///
/// Never fails: fragments that cannot be typed degrade to dynamic types.
pub fn build_model(doc: &Document, options: &ModelOptions) -> ClientModel {
    let classified = classify(doc, &options.inference);
    let resources = partition(doc, classified);

    let connection = ConnectionConfig {
        base_url: base_url(doc, options),
        timeout_ms: options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        auth: options.auth,
        with_interceptors: options.with_interceptors,
    };

    log::info!(
        "built client model for `{}`: {} resources, {} types",
        doc.info.title,
        resources.len(),
        resources.iter().map(|r| r.types.len()).sum::<usize>()
    );

    ClientModel {
        info: ApiInfo {
            title: doc.info.title.clone(),
            version: doc.info.version.clone(),
            description: doc.info.description.clone(),
        },
        connection,
        resources,
    }
}

fn base_url(doc: &Document, options: &ModelOptions) -> String {
    options
        .base_url
        .iter()
        .chain(doc.servers.iter().map(|s| &s.url))
        .find(|url| !url.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const V2: &str = r#"
swagger: "2.0"
info: { title: Shop, version: "2.1" }
host: shop.local
basePath: /api
schemes: [http]
paths:
  /ping:
    get: { responses: {} }
"#;

    #[test]
    fn test_connection_defaults() {
        let doc = parse::from_yaml(V2).unwrap();
        let model = build_model(&doc, &ModelOptions::default());
        assert_eq!(model.connection.base_url, "http://shop.local/api");
        assert_eq!(model.connection.timeout_ms, 10_000);
        assert_eq!(model.connection.auth, AuthMode::Bearer);
        assert_eq!(model.info.title, "Shop");
        assert_eq!(model.resource_names(), vec!["ping"]);
    }

    #[test]
    fn test_explicit_options_win() {
        let doc = parse::from_yaml(V2).unwrap();
        let options = ModelOptions {
            base_url: Some("https://prod.example.com".into()),
            timeout_ms: Some(500),
            auth: AuthMode::ApiKey,
            with_interceptors: true,
            ..ModelOptions::default()
        };
        let model = build_model(&doc, &options);
        assert_eq!(model.connection.base_url, "https://prod.example.com");
        assert_eq!(model.connection.timeout_ms, 500);
        assert_eq!(model.connection.auth, AuthMode::ApiKey);
        assert!(model.connection.with_interceptors);
    }

    #[test]
    fn test_fallback_base_url() {
        let doc = parse::from_yaml("openapi: 3.0.3\ninfo: { title: T, version: '1' }\npaths: {}\n")
            .unwrap();
        let model = build_model(&doc, &ModelOptions::default());
        assert_eq!(model.connection.base_url, DEFAULT_BASE_URL);
        assert!(model.resources.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let doc = parse::from_yaml(V2).unwrap();
        let options = ModelOptions::default();
        assert_eq!(build_model(&doc, &options), build_model(&doc, &options));
    }
}
