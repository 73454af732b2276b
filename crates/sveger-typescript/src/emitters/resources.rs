use minijinja::{Environment, context};
use sveger_core::GeneratedFile;
use sveger_core::ir::Resource;

use super::operations::{OperationNames, emit_operation};
use super::{render_file, resource_dir};
use crate::generator::GeneratorOptions;

/// `PetsApiClient`
pub fn class_name(resource: &Resource) -> String {
    format!("{}ApiClient", resource.name.pascal_case)
}

/// `petsApi`
pub fn instance_name(resource: &Resource) -> String {
    format!("{}Api", resource.name.camel_case)
}

/// Emit every file under `resources/<resource>/`: one module per operation, the
/// resource client class and the resource barrel.
pub fn emit_resource(
    env: &Environment<'_>,
    resource: &Resource,
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>, minijinja::Error> {
    let dir = resource_dir(resource);
    let class_name = class_name(resource);
    let instance_name = instance_name(resource);
    let display = resource.name.original.clone();

    let mut files = resource
        .methods
        .iter()
        .map(|method| emit_operation(env, resource, method, options))
        .collect::<Result<Vec<_>, _>>()?;

    let operations: Vec<OperationNames> = resource.methods.iter().map(OperationNames::new).collect();

    files.push(render_file(
        env,
        "resources/api-client.ts.j2",
        format!("resources/{dir}/{dir}-api.client.ts"),
        context! {
            display => display.clone(),
            operations => operations.clone(),
            class_name => class_name.clone(),
            instance_name => instance_name.clone(),
        },
    )?);

    files.push(render_file(
        env,
        "resources/index.ts.j2",
        format!("resources/{dir}/index.ts"),
        context! {
            display => display,
            operations => operations,
            class_name => class_name,
            instance_name => instance_name,
            dir => dir,
        },
    )?);

    Ok(files)
}
