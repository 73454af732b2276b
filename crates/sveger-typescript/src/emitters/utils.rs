use minijinja::{Environment, context};
use sveger_core::GeneratedFile;

use super::render_file;

const UTILS: [&str; 3] = ["error-handler", "query-builder", "helpers"];

/// Emit the static helpers under `utils/`.
pub fn emit_utils(env: &Environment<'_>) -> Result<Vec<GeneratedFile>, minijinja::Error> {
    UTILS
        .iter()
        .map(|name| {
            render_file(
                env,
                &format!("utils/{name}.ts.j2"),
                format!("utils/{name}.ts"),
                context! {},
            )
        })
        .collect()
}
