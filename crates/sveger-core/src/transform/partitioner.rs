use std::collections::{BTreeMap, BTreeSet, HashSet};

use indexmap::IndexMap;

use crate::ir::{Resource, TypeShape};
use crate::parse::Document;

use super::name_normalizer::{normalize_name, sanitize_type_name};
use super::operation_classifier::ClassifiedOperation;
use super::reference_graph::collect_into;
use super::schema_resolver::{ResolveContext, resolve};

/// Group classified operations into resources and attach every type each one reaches.
///
/// Grouping is case-insensitive on the resource name; the display name is the
/// first-seen casing. Operations keep document order. Resources come out sorted
/// by their lower-cased key.
pub fn partition(doc: &Document, classified: Vec<ClassifiedOperation<'_>>) -> Vec<Resource> {
    let mut groups: IndexMap<String, Vec<ClassifiedOperation<'_>>> = IndexMap::new();
    for op in classified {
        groups
            .entry(op.method.resource.to_lowercase())
            .or_default()
            .push(op);
    }

    let mut resources: Vec<Resource> = groups
        .into_iter()
        .map(|(key, ops)| build_resource(doc, key, ops))
        .collect();
    resources.sort_by(|a, b| a.key.cmp(&b.key));
    disambiguate_names(&mut resources);
    resources
}

/// Keys such as `store-orders` and `store_orders` group separately but re-case
/// to the same identifiers. Later resources get the smallest free numeric
/// suffix, starting at 2; the display name is kept.
fn disambiguate_names(resources: &mut [Resource]) {
    let mut taken = HashSet::new();
    for resource in resources.iter_mut() {
        if taken.insert(resource.name.kebab_case.clone()) {
            continue;
        }
        let original = resource.name.original.clone();
        let mut renamed = (2..)
            .map(|n| normalize_name(&format!("{original} {n}")))
            .find(|name| !taken.contains(&name.kebab_case))
            .unwrap_or_else(|| normalize_name(&original));
        log::warn!(
            "resource `{}` re-cases to the same name as another resource, emitted as `{}`",
            resource.key,
            renamed.kebab_case
        );
        taken.insert(renamed.kebab_case.clone());
        renamed.original = original;
        resource.name = renamed;
    }
}

fn build_resource(doc: &Document, key: String, ops: Vec<ClassifiedOperation<'_>>) -> Resource {
    let display = ops
        .first()
        .map(|op| op.method.resource.clone())
        .unwrap_or_else(|| key.clone());

    let reachable = reachable_schema_names(doc, &key, &ops);
    let types = resolve_definitions(doc, &key, &reachable);
    log::debug!(
        "resource `{display}`: {} operations, {} types",
        ops.len(),
        types.len()
    );

    Resource {
        name: normalize_name(&display),
        key,
        methods: ops.into_iter().map(|op| op.method).collect(),
        types,
    }
}

/// Raw schema names reachable from the operations of one resource, plus every
/// schema whose name mentions the resource.
fn reachable_schema_names(
    doc: &Document,
    key: &str,
    ops: &[ClassifiedOperation<'_>],
) -> BTreeSet<String> {
    let all = &doc.schemas;
    let mut visited = BTreeSet::new();

    for op in ops {
        // Every location counts, including header, cookie and formData.
        for schema in op.parameters.iter().filter_map(|p| p.effective_schema()) {
            collect_into(&schema, all, &mut visited);
        }
        if let Some(ref body) = op.operation.request_body {
            for schema in body.content.values().filter_map(|mt| mt.schema.as_ref()) {
                collect_into(schema, all, &mut visited);
            }
        }
        for response in op.operation.responses.values() {
            for schema in response.schemas() {
                collect_into(schema, all, &mut visited);
            }
        }
    }

    for (name, schema) in all {
        if name.to_lowercase().contains(key) && visited.insert(name.clone()) {
            collect_into(schema, all, &mut visited);
        }
    }
    visited
}

/// Resolve every reachable schema for a definitions file, keyed by sanitized name.
fn resolve_definitions(
    doc: &Document,
    key: &str,
    names: &BTreeSet<String>,
) -> BTreeMap<String, TypeShape> {
    let ctx = ResolveContext::definitions(&doc.schemas);
    let mut types = BTreeMap::new();
    for name in names {
        let Some(schema) = doc.schemas.get(name) else {
            continue;
        };
        let sanitized = sanitize_type_name(name);
        if types.contains_key(&sanitized) {
            log::warn!(
                "resource `{key}`: schema `{name}` collides with another schema as `{sanitized}`, keeping the first"
            );
            continue;
        }
        types.insert(sanitized, resolve(schema, &ctx));
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::transform::operation_classifier::classify;
    use crate::transform::return_type::InferenceOptions;

    fn resources(yaml: &str) -> Vec<Resource> {
        let doc = parse::from_yaml(yaml).unwrap();
        let classified = classify(&doc, &InferenceOptions::default());
        partition(&doc, classified)
    }

    fn type_names(resource: &Resource) -> Vec<&str> {
        resource.types.keys().map(String::as_str).collect()
    }

    const PETSTORE: &str = r##"
openapi: "3.0.0"
info: { title: Store, version: "1" }
paths:
  /pets:
    get:
      tags: [Pets]
      parameters:
        - name: status
          in: query
          schema: { $ref: "#/components/schemas/PetStatus" }
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
  /orders:
    post:
      tags: [orders]
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/NewOrder" }
      responses:
        "201":
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Order" }
        "400":
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Problem" }
  /pets/{id}:
    delete:
      tags: [pets]
      parameters:
        - { name: id, in: path, schema: { type: string } }
      responses: {}
components:
  schemas:
    Pet:
      type: object
      properties:
        category: { $ref: "#/components/schemas/Category" }
    PetStatus: { type: string, enum: [available, sold] }
    PetsPage: { type: object }
    Category: { type: object }
    NewOrder:
      type: object
      properties:
        pet: { $ref: "#/components/schemas/Pet" }
    Order: { type: object }
    Problem: { type: object }
    Unrelated: { type: object }
"##;

    #[test]
    fn test_grouping_sorted_and_case_insensitive() {
        let resources = resources(PETSTORE);
        let keys: Vec<&str> = resources.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["orders", "pets"]);

        let pets = &resources[1];
        assert_eq!(pets.name.original, "Pets");
        let methods: Vec<&str> = pets.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["getPets", "deletePetsById"]);
    }

    #[test]
    fn test_reachable_types() {
        let resources = resources(PETSTORE);
        assert_eq!(
            type_names(&resources[1]),
            vec!["Category", "Pet", "PetStatus", "PetsPage"]
        );
        assert_eq!(
            type_names(&resources[0]),
            vec!["Category", "NewOrder", "Order", "Pet", "Problem"]
        );
        assert!(
            resources
                .iter()
                .all(|r| !r.types.contains_key("Unrelated"))
        );
    }

    #[test]
    fn test_definition_scope() {
        let resources = resources(PETSTORE);
        let TypeShape::Object(ref props) = resources[1].types["Pet"] else {
            panic!("expected object");
        };
        assert_eq!(
            props["category"].shape,
            TypeShape::reference("Category", crate::ir::RefScope::Definition)
        );
    }

    #[test]
    fn test_cyclic_types_terminate() {
        let resources = resources(
            r##"
swagger: "2.0"
info: { title: T, version: "1" }
paths:
  /tree:
    get:
      responses:
        "200":
          schema: { $ref: "#/definitions/Node" }
definitions:
  Node:
    type: object
    properties:
      parent: { $ref: "#/definitions/Node" }
      link: { $ref: "#/definitions/Link" }
  Link:
    type: object
    properties:
      node: { $ref: "#/definitions/Node" }
"##,
        );
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].key, "tree");
        assert_eq!(type_names(&resources[0]), vec!["Link", "Node"]);
    }

    #[test]
    fn test_header_and_cookie_parameter_types() {
        let resources = resources(
            r##"
openapi: "3.0.0"
info: { title: T, version: "1" }
paths:
  /pets:
    get:
      parameters:
        - name: X-Tenant
          in: header
          schema: { $ref: "#/components/schemas/Tenant" }
        - name: session
          in: cookie
          schema: { $ref: "#/components/schemas/Session" }
      responses: {}
components:
  schemas:
    Tenant: { type: string }
    Session: { type: object }
"##,
        );
        assert_eq!(type_names(&resources[0]), vec!["Session", "Tenant"]);
        // Not part of the method signature.
        assert!(resources[0].methods[0].query_params.is_empty());
    }

    #[test]
    fn test_recased_resource_names_are_disambiguated() {
        let resources = resources(
            r#"
openapi: "3.0.0"
info: { title: T, version: "1" }
paths:
  /a:
    get: { tags: [store-orders], responses: {} }
  /b:
    get: { tags: [store_orders], responses: {} }
"#,
        );
        let keys: Vec<&str> = resources.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["store-orders", "store_orders"]);

        assert_eq!(resources[0].name.kebab_case, "store-orders");
        assert_eq!(resources[0].name.camel_case, "storeOrders");
        let second = &resources[1].name;
        assert_eq!(second.original, "store_orders");
        assert_eq!(second.kebab_case, "store-orders-2");
        assert_eq!(second.camel_case, "storeOrders2");
        assert_eq!(second.pascal_case, "StoreOrders2");
    }

    #[test]
    fn test_sanitized_names() {
        let resources = resources(
            r##"
swagger: "2.0"
info: { title: T, version: "1" }
paths:
  /users:
    get:
      responses:
        "200":
          schema: { $ref: "#/definitions/user_dto.User" }
definitions:
  user_dto.User: { type: object }
"##,
        );
        assert_eq!(type_names(&resources[0]), vec!["user_dto_User"]);
    }
}
