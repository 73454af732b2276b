use minijinja::{Environment, context};
use sveger_core::GeneratedFile;
use sveger_core::ir::ClientModel;

use super::render_file;
use super::resource_dir;
use super::resources::{class_name, instance_name};
use crate::type_mapper::property_key;

/// Emit the root `index.ts`: re-exports plus the `api` object keyed by resource.
pub fn emit_index(
    env: &Environment<'_>,
    model: &ClientModel,
) -> Result<GeneratedFile, minijinja::Error> {
    let resources: Vec<minijinja::Value> = model
        .resources
        .iter()
        .map(|resource| {
            context! {
                key => property_key(&resource.key),
                dir => resource_dir(resource),
                class_name => class_name(resource),
                instance_name => instance_name(resource),
            }
        })
        .collect();

    render_file(
        env,
        "index.ts.j2",
        "index.ts",
        context! {
            title => model.info.title.clone(),
            version => model.info.version.clone(),
            resources => resources,
        },
    )
}
