use sveger_core::ir::ClientModel;
use sveger_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

/// Emission switches that do not change the client's behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Omit JSDoc blocks on operations and query fields.
    pub no_jsdoc: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// TypeScript/Axios client generator.
///
/// Output layout, relative to the output directory:
///
/// ```text
/// config/{constants,axios.config}.ts
/// types/{common.types,<resource>.types,index}.ts
/// utils/{error-handler,query-builder,helpers}.ts
/// resources/<resource>/operations/<operation>.ts
/// resources/<resource>/{<resource>-api.client,index}.ts
/// index.ts
/// ```
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = GeneratorOptions;
    type Error = GeneratorError;

    fn generate(
        &self,
        model: &ClientModel,
        options: &GeneratorOptions,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment();

        let mut files = emitters::config::emit_config(&env, model)?;

        files.push(emitters::types::emit_common_types(&env)?);
        for resource in &model.resources {
            if let Some(file) = emitters::types::emit_resource_types(&env, resource)? {
                files.push(file);
            }
        }
        files.push(emitters::types::emit_types_index(&env, &model.resources)?);

        files.extend(emitters::utils::emit_utils(&env)?);

        for resource in &model.resources {
            let resource_files = emitters::resources::emit_resource(&env, resource, options)?;
            log::debug!(
                "resource `{}`: {} files",
                resource.name,
                resource_files.len()
            );
            files.extend(resource_files);
        }

        files.push(emitters::index::emit_index(&env, model)?);

        log::info!(
            "generated {} files for {} resources",
            files.len(),
            model.resources.len()
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use sveger_core::parse;
    use sveger_core::transform::{ModelOptions, build_model};

    use super::*;

    const SHOP: &str = r##"
openapi: 3.0.3
info: { title: Shop, version: "1.2" }
servers:
  - url: https://shop.example.com/api
paths:
  /items:
    get:
      operationId: listItems
      tags: [Items]
      parameters:
        - { name: page, in: query, schema: { type: integer } }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Item" }
  /health:
    get:
      responses:
        "204": { description: up }
components:
  schemas:
    Item:
      type: object
      required: [id]
      properties:
        id: { type: string }
        price: { type: number }
"##;

    fn generate(options: &ModelOptions) -> Vec<GeneratedFile> {
        let doc = parse::from_yaml(SHOP).unwrap();
        let model = build_model(&doc, options);
        TypeScriptGenerator
            .generate(&model, &GeneratorOptions::default())
            .unwrap()
    }

    fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a GeneratedFile {
        files
            .iter()
            .find(|f| f.path == path)
            .unwrap_or_else(|| panic!("missing {path}"))
    }

    #[test]
    fn test_file_layout() {
        let files = generate(&ModelOptions::default());
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "config/constants.ts",
                "config/axios.config.ts",
                "types/common.types.ts",
                "types/items.types.ts",
                "types/index.ts",
                "utils/error-handler.ts",
                "utils/query-builder.ts",
                "utils/helpers.ts",
                "resources/health/operations/get-health.ts",
                "resources/health/health-api.client.ts",
                "resources/health/index.ts",
                "resources/items/operations/list-items.ts",
                "resources/items/items-api.client.ts",
                "resources/items/index.ts",
                "index.ts",
            ]
        );
    }

    #[test]
    fn test_constants_carry_connection() {
        let files = generate(&ModelOptions {
            timeout_ms: Some(2500),
            ..ModelOptions::default()
        });
        let constants = &file(&files, "config/constants.ts").content;
        assert!(constants.contains("API constants for Shop v1.2."));
        assert!(constants.contains("DEFAULT_BASE_URL: \"https://shop.example.com/api\","));
        assert!(constants.contains("DEFAULT_TIMEOUT: 2500,"));
        assert!(constants.contains("AUTH_MODE: \"bearer\","));
    }

    #[test]
    fn test_interceptors_toggle() {
        let plain = generate(&ModelOptions::default());
        let axios = &file(&plain, "config/axios.config.ts").content;
        assert!(!axios.contains("interceptors?:"));
        assert!(!axios.contains("client.interceptors.response.use"));

        let hooked = generate(&ModelOptions {
            with_interceptors: true,
            ..ModelOptions::default()
        });
        let axios = &file(&hooked, "config/axios.config.ts").content;
        assert!(axios.contains("interceptors?:"));
        assert!(axios.contains("client.interceptors.response.use"));
    }

    #[test]
    fn test_item_types() {
        let files = generate(&ModelOptions::default());
        insta::assert_snapshot!(file(&files, "types/items.types.ts").content, @r"
        // Types for the Items resource.

        export interface Item {
          id: string;
          price?: number;
        }
        ");
    }

    #[test]
    fn test_root_index() {
        let files = generate(&ModelOptions::default());
        let index = &file(&files, "index.ts").content;
        assert!(index.contains("import { healthApi } from './resources/health';"));
        assert!(index.contains(
            "export { ItemsApiClient, itemsApi } from './resources/items';"
        ));
        assert!(index.contains("export const api = {\n  health: healthApi,\n  items: itemsApi,\n};"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            generate(&ModelOptions::default()),
            generate(&ModelOptions::default())
        );
    }
}
