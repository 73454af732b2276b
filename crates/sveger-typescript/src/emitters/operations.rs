use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase};
use minijinja::{Environment, context};
use serde::Serialize;
use sveger_core::GeneratedFile;
use sveger_core::ir::{HttpMethod, MethodDef, ParamDef, Resource};

use super::{render_file, resource_dir};
use crate::generator::GeneratorOptions;
use crate::type_mapper::{TYPES_NAMESPACE, is_identifier, property_key, shape_to_ts, string_literal};

/// Local names inside a generated operation that a path parameter must not shadow.
const RESERVED_LOCALS: &[&str] = &[
    "client",
    "config",
    "data",
    "pathParams",
    "query",
    "requestConfig",
    "response",
    "url",
];

/// Generated names of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationNames {
    /// Exported TypeScript identifier, e.g. `listPets`.
    pub name: String,
    /// File stem under `operations/`, e.g. `list-pets`.
    pub file: String,
    /// Query interface, present only when the operation takes query parameters.
    pub query_type: Option<String>,
}

impl OperationNames {
    pub fn new(method: &MethodDef) -> Self {
        let name = operation_ident(&method.name);
        let query_type = (!method.query_params.is_empty())
            .then(|| format!("{}Query", method.name.to_pascal_case()));
        Self {
            file: name.to_kebab_case(),
            name,
            query_type,
        }
    }
}

/// Lower camel case identifier for an operation id, prefixed with `_` when it
/// would otherwise start with a digit.
pub fn operation_ident(operation_id: &str) -> String {
    let ident = operation_id.to_lower_camel_case();
    if is_identifier(&ident) {
        ident
    } else {
        format!("_{ident}")
    }
}

/// Emit `resources/<resource>/operations/<operation>.ts`.
pub fn emit_operation(
    env: &Environment<'_>,
    resource: &Resource,
    method: &MethodDef,
    options: &GeneratorOptions,
) -> Result<GeneratedFile, minijinja::Error> {
    let names = OperationNames::new(method);
    let return_type = shape_to_ts(&method.return_type);

    let path_vars: Vec<(&ParamDef, String)> = method
        .path_params
        .iter()
        .map(|p| (p, path_variable(&p.name)))
        .collect();
    let query_fields: Vec<QueryField> = method.query_params.iter().map(QueryField::new).collect();
    let query_required = method.query_params.iter().any(|p| p.required);

    let mut params: Vec<String> = path_vars
        .iter()
        .map(|(p, var)| format!("{var}: {}", shape_to_ts(&p.param_type)))
        .collect();
    if let Some(body) = &method.request_body {
        // An optional parameter may not precede a required one.
        let body_type = shape_to_ts(&body.body_type);
        if body.required {
            params.push(format!("data: {body_type}"));
        } else if query_required {
            params.push(format!("data: {body_type} | undefined"));
        } else {
            params.push(format!("data?: {body_type}"));
        }
    }
    if let Some(query_type) = &names.query_type {
        let marker = if query_required { "" } else { "?" };
        params.push(format!("query{marker}: {query_type}"));
    }
    params.push("config?: AxiosRequestConfig".to_string());

    let qualifier = format!("{TYPES_NAMESPACE}.");
    let uses_types = std::iter::once(&return_type)
        .chain(params.iter())
        .chain(query_fields.iter().map(|f| &f.ts_type))
        .any(|ts| ts.contains(&qualifier));

    let path_params = path_vars
        .iter()
        .map(|(p, var)| {
            let key = property_key(&p.name);
            if key == *var {
                key
            } else {
                format!("{key}: {var}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let has_body = method.request_body.is_some();
    let sends_body = matches!(
        method.method,
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
    );
    let query_arg = if names.query_type.is_some() { "query" } else { "undefined" };
    let body_arg = if has_body { "data" } else { "undefined" };

    render_file(
        env,
        "resources/operation.ts.j2",
        format!(
            "resources/{}/operations/{}.ts",
            resource_dir(resource),
            names.file
        ),
        context! {
            name => names.name,
            query_type => names.query_type,
            query_fields => query_fields,
            no_jsdoc => options.no_jsdoc,
            description => method.description.as_deref().map(jsdoc_text),
            summary => method.summary.as_deref().map(jsdoc_text),
            tags => method.tags.join(", "),
            deprecated => method.deprecated,
            http_upper => method.method.as_str(),
            http_method => method.method.as_str().to_lowercase(),
            raw_path => method.path.clone(),
            path => string_literal(&method.path),
            has_path_params => !path_vars.is_empty(),
            path_params => path_params,
            params => params,
            return_type => return_type,
            uses_types => uses_types,
            query_arg => query_arg,
            sends_body => sends_body,
            body_arg => body_arg,
            body_in_config => has_body && !sends_body,
        },
    )
}

#[derive(Debug, Serialize)]
struct QueryField {
    key: String,
    optional: bool,
    #[serde(rename = "type")]
    ts_type: String,
    description: Option<String>,
}

impl QueryField {
    fn new(param: &ParamDef) -> Self {
        Self {
            key: property_key(&param.name),
            optional: !param.required,
            ts_type: shape_to_ts(&param.param_type),
            description: param.description.as_deref().map(jsdoc_text),
        }
    }
}

fn path_variable(name: &str) -> String {
    let var = operation_ident(name);
    if RESERVED_LOCALS.contains(&var.as_str()) {
        format!("{var}Param")
    } else {
        var
    }
}

/// Keep multi-line text inside a JSDoc block.
fn jsdoc_text(text: &str) -> String {
    text.trim().lines().collect::<Vec<_>>().join("\n * ")
}
