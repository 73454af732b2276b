pub mod config;
pub mod index;
pub mod operations;
pub mod resources;
pub mod types;
pub mod utils;

use minijinja::Environment;
use sveger_core::GeneratedFile;
use sveger_core::ir::Resource;

const TEMPLATES: &[(&str, &str)] = &[
    (
        "config/constants.ts.j2",
        include_str!("../../templates/config/constants.ts.j2"),
    ),
    (
        "config/axios.config.ts.j2",
        include_str!("../../templates/config/axios.config.ts.j2"),
    ),
    (
        "types/common.types.ts.j2",
        include_str!("../../templates/types/common.types.ts.j2"),
    ),
    (
        "types/resource.types.ts.j2",
        include_str!("../../templates/types/resource.types.ts.j2"),
    ),
    (
        "types/index.ts.j2",
        include_str!("../../templates/types/index.ts.j2"),
    ),
    (
        "utils/error-handler.ts.j2",
        include_str!("../../templates/utils/error-handler.ts.j2"),
    ),
    (
        "utils/query-builder.ts.j2",
        include_str!("../../templates/utils/query-builder.ts.j2"),
    ),
    (
        "utils/helpers.ts.j2",
        include_str!("../../templates/utils/helpers.ts.j2"),
    ),
    (
        "resources/operation.ts.j2",
        include_str!("../../templates/resources/operation.ts.j2"),
    ),
    (
        "resources/api-client.ts.j2",
        include_str!("../../templates/resources/api-client.ts.j2"),
    ),
    (
        "resources/index.ts.j2",
        include_str!("../../templates/resources/index.ts.j2"),
    ),
    ("index.ts.j2", include_str!("../../templates/index.ts.j2")),
];

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Template environment with every embedded template registered.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .expect("embedded template should be valid");
    }
    env
}

/// Render a template straight into a file at `path`.
pub(crate) fn render_file(
    env: &Environment<'_>,
    template: &str,
    path: impl Into<String>,
    ctx: minijinja::Value,
) -> Result<GeneratedFile, minijinja::Error> {
    let content = env.get_template(template)?.render(ctx)?;
    Ok(GeneratedFile {
        path: path.into(),
        content,
    })
}

/// Directory (and file stem) a resource is emitted under: `resources/<dir>/`.
pub fn resource_dir(resource: &Resource) -> &str {
    &resource.name.kebab_case
}
