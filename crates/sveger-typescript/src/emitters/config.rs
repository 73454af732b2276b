use minijinja::{Environment, context};
use sveger_core::GeneratedFile;
use sveger_core::ir::ClientModel;

use super::render_file;
use crate::type_mapper::string_literal;

/// Emit `config/constants.ts` and `config/axios.config.ts`.
pub fn emit_config(
    env: &Environment<'_>,
    model: &ClientModel,
) -> Result<Vec<GeneratedFile>, minijinja::Error> {
    let connection = &model.connection;
    let auth_mode = string_literal(connection.auth.as_str());

    let constants = render_file(
        env,
        "config/constants.ts.j2",
        "config/constants.ts",
        context! {
            title => model.info.title.clone(),
            version => model.info.version.clone(),
            base_url => string_literal(&connection.base_url),
            timeout => connection.timeout_ms,
            auth_mode => auth_mode.clone(),
        },
    )?;

    let axios = render_file(
        env,
        "config/axios.config.ts.j2",
        "config/axios.config.ts",
        context! {
            auth_mode => auth_mode,
            with_interceptors => connection.with_interceptors,
        },
    )?;

    Ok(vec![constants, axios])
}
