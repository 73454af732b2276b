use serde::Serialize;

use super::types::TypeShape;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A piece of a templated path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    Literal(String),
    Param(String),
}

/// Split `/pets/{petId}/photos` into literal and parameter pieces.
///
/// An unterminated `{` is kept as literal text.
pub fn parse_path_template(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        if open > 0 {
            segments.push(PathSegment::Literal(rest[..open].to_string()));
        }
        segments.push(PathSegment::Param(rest[open + 1..close].to_string()));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(PathSegment::Literal(rest.to_string()));
    }
    segments
}

/// A typed query or path parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: TypeShape,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a request body came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySource {
    /// Swagger 2 `in: body` parameter.
    BodyParameter { name: String },
    /// OpenAPI 3 `requestBody`.
    RequestBody,
}

/// The request payload of an operation, whichever dialect described it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBodyShape {
    pub body_type: TypeShape,
    pub required: bool,
    pub content_type: String,
    pub source: BodySource,
}

/// A fully classified operation, ready for emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDef {
    /// Display name of the owning resource.
    pub resource: String,
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub path_template: Vec<PathSegment>,
    pub return_type: TypeShape,
    pub query_params: Vec<ParamDef>,
    pub path_params: Vec<ParamDef>,
    pub request_body: Option<RequestBodyShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_template() {
        assert_eq!(
            parse_path_template("/pets/{petId}/photos"),
            vec![
                PathSegment::Literal("/pets/".into()),
                PathSegment::Param("petId".into()),
                PathSegment::Literal("/photos".into()),
            ]
        );
    }

    #[test]
    fn test_parse_path_template_trailing_param() {
        assert_eq!(
            parse_path_template("/store/order/{orderId}"),
            vec![
                PathSegment::Literal("/store/order/".into()),
                PathSegment::Param("orderId".into()),
            ]
        );
    }

    #[test]
    fn test_parse_path_template_unterminated() {
        assert_eq!(
            parse_path_template("/a/{b"),
            vec![PathSegment::Literal("/a/{b".into())]
        );
    }
}
