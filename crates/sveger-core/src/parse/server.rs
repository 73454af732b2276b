use serde::{Deserialize, Serialize};

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Build a server from Swagger 2 `schemes`, `host` and `basePath`.
///
/// `https` wins when listed; otherwise the first scheme, defaulting to `https`.
pub fn from_swagger_host(
    schemes: &[String],
    host: Option<&str>,
    base_path: Option<&str>,
) -> Option<Server> {
    let base_path = base_path.unwrap_or("");
    let url = match host.filter(|h| !h.is_empty()) {
        Some(host) => {
            let scheme = if schemes.iter().any(|s| s == "https") {
                "https"
            } else {
                schemes.first().map(String::as_str).unwrap_or("https")
            };
            format!("{scheme}://{host}{base_path}")
        }
        None if !base_path.is_empty() => base_path.to_string(),
        None => return None,
    };
    Some(Server {
        url,
        description: None,
    })
}
