use std::collections::HashSet;

use heck::ToKebabCase;
use indexmap::IndexMap;

use crate::ir::{
    BodySource, HttpMethod, MethodDef, ParamDef, RequestBodyShape, TypeShape, parse_path_template,
};
use crate::parse::Document;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::request_body::RequestBody;

use super::name_normalizer::synthesize_operation_id;
use super::return_type::{InferenceOptions, infer_return_type};
use super::schema_resolver::{ResolveContext, resolve};

const DEFAULT_RESOURCE: &str = "default";
const JSON_MEDIA_TYPE: &str = "application/json";

/// A classified operation together with the source it was built from.
///
/// The partitioner walks `operation` and `parameters` to find reachable types.
#[derive(Debug, Clone)]
pub struct ClassifiedOperation<'a> {
    pub method: MethodDef,
    pub operation: &'a Operation,
    /// Effective parameters: path-level merged with operation-level, refs followed.
    pub parameters: Vec<&'a Parameter>,
}

/// Walk every `(path, method, operation)` triple of the document in document order.
pub fn classify<'a>(doc: &'a Document, options: &InferenceOptions) -> Vec<ClassifiedOperation<'a>> {
    let ctx = ResolveContext::usage(&doc.schemas);
    let mut ids = IdRegistry::default();
    let mut resources: IndexMap<String, String> = IndexMap::new();
    let mut out = Vec::new();

    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            let parameters = effective_parameters(doc, &item.parameters, &op.parameters);

            let raw_id = match op.operation_id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => synthesize_operation_id(method.as_str(), path),
            };
            let name = ids.claim(raw_id, method, path);

            let owner = resource_name_for(&op.tags, path);
            let resource = resources
                .entry(owner.to_lowercase())
                .or_insert(owner)
                .clone();

            let method_def = build_method(
                resource, name, method, path, op, &parameters, &ctx, options,
            );
            out.push(ClassifiedOperation {
                method: method_def,
                operation: op,
                parameters,
            });
        }
    }

    log::info!(
        "classified {} operations into {} resources",
        out.len(),
        resources.len()
    );
    out
}

/// The owning resource: first tag, else the first literal path segment.
pub fn resource_name_for(tags: &[String], path: &str) -> String {
    if let Some(tag) = tags.iter().map(|t| t.trim()).find(|t| !t.is_empty()) {
        return tag.to_string();
    }
    path.split('/')
        .find(|s| !s.is_empty() && !s.starts_with('{'))
        .unwrap_or(DEFAULT_RESOURCE)
        .to_string()
}

#[allow(clippy::too_many_arguments)]
fn build_method(
    resource: String,
    name: String,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    parameters: &[&Parameter],
    ctx: &ResolveContext<'_>,
    options: &InferenceOptions,
) -> MethodDef {
    let mut query_params = Vec::new();
    let mut path_params = Vec::new();
    let mut request_body = None;

    for param in parameters {
        match param.location {
            ParameterLocation::Query => query_params.push(param_def(param, param.required, ctx)),
            ParameterLocation::Path => path_params.push(param_def(param, true, ctx)),
            ParameterLocation::Body if request_body.is_none() => {
                request_body = Some(RequestBodyShape {
                    body_type: param_type(param, ctx),
                    required: param.required,
                    content_type: JSON_MEDIA_TYPE.to_string(),
                    source: BodySource::BodyParameter {
                        name: param.name.clone(),
                    },
                });
            }
            ref location => {
                log::debug!(
                    "{} {path}: skipping {location:?} parameter `{}`",
                    method.as_str(),
                    param.name
                );
            }
        }
    }

    // A Swagger 2 body parameter takes precedence over an OpenAPI 3 requestBody.
    if request_body.is_none()
        && let Some(ref body) = op.request_body
    {
        request_body = Some(request_body_shape(body, ctx));
    }

    MethodDef {
        resource,
        name,
        method,
        path: path.to_string(),
        path_template: parse_path_template(path),
        return_type: infer_return_type(&op.responses, ctx, options),
        query_params,
        path_params,
        request_body,
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        deprecated: op.deprecated.unwrap_or(false),
    }
}

fn request_body_shape(body: &RequestBody, ctx: &ResolveContext<'_>) -> RequestBodyShape {
    match body.json() {
        Some(mt) => RequestBodyShape {
            body_type: mt
                .schema
                .as_ref()
                .map(|s| resolve(s, ctx))
                .unwrap_or(TypeShape::Unresolved),
            required: body.required,
            content_type: JSON_MEDIA_TYPE.to_string(),
            source: BodySource::RequestBody,
        },
        None => RequestBodyShape {
            body_type: TypeShape::Unresolved,
            required: body.required,
            content_type: body
                .content
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| JSON_MEDIA_TYPE.to_string()),
            source: BodySource::RequestBody,
        },
    }
}

fn param_def(param: &Parameter, required: bool, ctx: &ResolveContext<'_>) -> ParamDef {
    ParamDef {
        name: param.name.clone(),
        param_type: param_type(param, ctx),
        required,
        description: param.description.clone(),
    }
}

fn param_type(param: &Parameter, ctx: &ResolveContext<'_>) -> TypeShape {
    param
        .effective_schema()
        .map(|schema| resolve(&schema, ctx))
        .unwrap_or(TypeShape::Unresolved)
}

/// Merge path-level and operation-level parameters, following local `$ref`s.
///
/// An operation-level parameter replaces a path-level one with the same name
/// and location.
fn effective_parameters<'a>(
    doc: &'a Document,
    path_level: &'a [ParameterOrRef],
    op_level: &'a [ParameterOrRef],
) -> Vec<&'a Parameter> {
    let op_params: Vec<&Parameter> = op_level.iter().filter_map(|p| deref(doc, p)).collect();
    let mut merged: Vec<&Parameter> = path_level
        .iter()
        .filter_map(|p| deref(doc, p))
        .filter(|p| {
            !op_params
                .iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .collect();
    merged.extend(op_params);
    merged
}

fn deref<'a>(doc: &'a Document, param: &'a ParameterOrRef) -> Option<&'a Parameter> {
    match param {
        ParameterOrRef::Parameter(p) => Some(p),
        ParameterOrRef::Ref { ref_path } => {
            let found = doc.parameter(ref_path);
            if found.is_none() {
                log::warn!("unresolvable parameter reference {ref_path}, skipping");
            }
            found
        }
    }
}

/// Hands out unique operation identifiers in document order.
///
/// Identifiers are compared by their word form (`list_pets` and `listPets` are
/// the same identifier), since emitters re-case them. A colliding identifier
/// gets the smallest free numeric suffix, starting at 2.
#[derive(Debug, Default)]
struct IdRegistry {
    taken: HashSet<String>,
}

impl IdRegistry {
    fn claim(&mut self, id: String, method: HttpMethod, path: &str) -> String {
        if self.taken.insert(id.to_kebab_case()) {
            return id;
        }
        let unique = (2..)
            .map(|n| format!("{id}{n}"))
            .find(|candidate| !self.taken.contains(&candidate.to_kebab_case()))
            .unwrap_or_else(|| id.clone());
        log::warn!(
            "operation identifier `{id}` of {} {path} is already used, renamed to `{unique}`",
            method.as_str()
        );
        self.taken.insert(unique.to_kebab_case());
        unique
    }
}
