use indexmap::IndexMap;

use crate::ir::{PrimitiveKind, PropertyShape, TypeShape};
use crate::parse::response::Response;
use crate::parse::schema::{Schema, SchemaType};

use super::schema_resolver::{ResolveContext, resolve};

/// Success status codes consulted, in priority order.
const SUCCESS_CODES: [&str; 2] = ["200", "201"];

/// Tuning for return-type inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Namespace markers of framework-internal schemas (`pkg_Response`,
    /// `fiber_Map`). A reference carrying one is never chosen from a composition.
    pub opaque_namespaces: Vec<String>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            opaque_namespaces: vec!["pkg".to_string(), "fiber".to_string()],
        }
    }
}

impl InferenceOptions {
    fn is_opaque(&self, type_name: &str) -> bool {
        self.opaque_namespaces
            .iter()
            .any(|ns| type_name.contains(&format!("{ns}_")))
    }
}

/// Pick the most specific usable return type of an operation.
pub fn infer_return_type(
    responses: &IndexMap<String, Response>,
    ctx: &ResolveContext<'_>,
    options: &InferenceOptions,
) -> TypeShape {
    for code in SUCCESS_CODES {
        let Some(response) = responses.get(code) else {
            continue;
        };

        if let Some(shape) = response
            .schemas()
            .map(|schema| resolve(schema, ctx))
            .find(|shape| !shape.is_unresolved())
        {
            return shape;
        }

        if let Some(shape) = response
            .schemas()
            .filter(|schema| !schema.all_of.is_empty())
            .find_map(|schema| infer_composition(&schema.all_of, ctx, options))
        {
            return shape;
        }
    }
    TypeShape::Unresolved
}

/// Look inside an `allOf` for something more useful than a dynamic type.
///
/// Branches are tried in order. A `data` property wrapping a nested `allOf`
/// with a `data` array of references is the paginated envelope; a bare `data`
/// array of references yields the array; a direct reference yields itself
/// unless it is opaque.
fn infer_composition(
    branches: &[Schema],
    ctx: &ResolveContext<'_>,
    options: &InferenceOptions,
) -> Option<TypeShape> {
    for branch in branches {
        if let Some(data) = branch.properties.get("data") {
            if let Some(item) = data
                .all_of
                .iter()
                .filter_map(|inner| inner.properties.get("data"))
                .find_map(|array| referenced_items(array, ctx))
            {
                return Some(paginated_envelope(item));
            }
            if let Some(item) = referenced_items(data, ctx) {
                return Some(TypeShape::array(item));
            }
        }

        if branch.reference().is_some() {
            let shape = resolve(branch, ctx);
            match shape {
                TypeShape::Reference(ref r) if !options.is_opaque(&r.name) => return Some(shape),
                TypeShape::Reference(ref r) => {
                    log::debug!("skipping opaque composition branch {}", r.name)
                }
                _ => {}
            }
        }
    }
    None
}

/// The item type of an array schema whose items are a reference.
fn referenced_items(schema: &Schema, ctx: &ResolveContext<'_>) -> Option<TypeShape> {
    if schema.primary_type() != Some(&SchemaType::Array) {
        return None;
    }
    let items = schema.items.as_deref()?;
    items.reference()?;
    Some(resolve(items, ctx))
}

/// `{ data: { data: T[]; pagination: any }; error: boolean; message: string }`
fn paginated_envelope(item: TypeShape) -> TypeShape {
    let page = IndexMap::from([
        ("data".to_string(), required(TypeShape::array(item))),
        ("pagination".to_string(), required(TypeShape::Unresolved)),
    ]);
    TypeShape::Object(IndexMap::from([
        ("data".to_string(), required(TypeShape::Object(page))),
        (
            "error".to_string(),
            required(TypeShape::Primitive(PrimitiveKind::Boolean)),
        ),
        (
            "message".to_string(),
            required(TypeShape::Primitive(PrimitiveKind::String)),
        ),
    ]))
}

fn required(shape: TypeShape) -> PropertyShape {
    PropertyShape {
        shape,
        optional: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RefScope;
    use crate::parse::SchemaMap;

    fn responses(json: &str) -> IndexMap<String, Response> {
        serde_json::from_str(json).unwrap()
    }

    fn infer(json: &str) -> TypeShape {
        let schemas = SchemaMap::new();
        infer_return_type(
            &responses(json),
            &ResolveContext::usage(&schemas),
            &InferenceOptions::default(),
        )
    }

    fn usage(name: &str) -> TypeShape {
        TypeShape::reference(name, RefScope::Usage)
    }

    #[test]
    fn test_v3_content() {
        let shape = infer(
            r##"{"200":{"description":"ok","content":{"application/json":{"schema":{"$ref":"#/components/schemas/Pet"}}}}}"##,
        );
        assert_eq!(shape, usage("Pet"));
    }

    #[test]
    fn test_first_usable_media_type_wins() {
        let shape = infer(
            r##"{"200":{"content":{
                "text/plain":{"schema":{}},
                "application/json":{"schema":{"type":"array","items":{"$ref":"#/components/schemas/Pet"}}}
            }}}"##,
        );
        assert_eq!(shape, TypeShape::array(usage("Pet")));
    }

    #[test]
    fn test_v2_schema_and_201_fallback() {
        let shape = infer(
            r##"{"400":{"schema":{"$ref":"#/definitions/Error"}},"201":{"schema":{"type":"string"}}}"##,
        );
        assert_eq!(shape, TypeShape::Primitive(PrimitiveKind::String));
    }

    #[test]
    fn test_200_preferred_over_201() {
        let shape = infer(
            r##"{"201":{"schema":{"$ref":"#/definitions/B"}},"200":{"schema":{"$ref":"#/definitions/A"}}}"##,
        );
        assert_eq!(shape, usage("A"));
    }

    #[test]
    fn test_paginated_envelope() {
        let shape = infer(
            r##"{"200":{"schema":{"allOf":[
                {"$ref":"#/definitions/pkg.Response"},
                {"properties":{"data":{"allOf":[
                    {"$ref":"#/definitions/pkg.Paginated"},
                    {"properties":{"data":{"type":"array","items":{"$ref":"#/definitions/models.Pet"}}}}
                ]}}}
            ]}}}"##,
        );
        let TypeShape::Object(ref props) = shape else {
            panic!("expected object, got {shape:?}");
        };
        let names: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["data", "error", "message"]);
        assert!(props.values().all(|p| !p.optional));
        let TypeShape::Object(ref page) = props["data"].shape else {
            panic!("expected page object");
        };
        assert_eq!(page["data"].shape, TypeShape::array(usage("models_Pet")));
        assert!(page["pagination"].shape.is_unresolved());
    }

    #[test]
    fn test_simple_data_array_in_composition() {
        let shape = infer(
            r##"{"200":{"schema":{"allOf":[
                {"$ref":"#/definitions/pkg.Response"},
                {"properties":{"data":{"type":"array","items":{"$ref":"#/definitions/Order"}}}}
            ]}}}"##,
        );
        assert_eq!(shape, TypeShape::array(usage("Order")));
    }

    #[test]
    fn test_opaque_references_skipped() {
        let shape = infer(
            r##"{"200":{"schema":{"allOf":[
                {"$ref":"#/definitions/fiber.Map"},
                {"$ref":"#/definitions/pkg.Response"},
                {"$ref":"#/definitions/models.User"}
            ]}}}"##,
        );
        assert_eq!(shape, usage("models_User"));
    }

    #[test]
    fn test_custom_opaque_namespaces() {
        let schemas = SchemaMap::new();
        let options = InferenceOptions {
            opaque_namespaces: vec!["internal".into()],
        };
        let shape = infer_return_type(
            &responses(
                r##"{"200":{"schema":{"allOf":[
                    {"$ref":"#/definitions/internal.Envelope"},
                    {"$ref":"#/definitions/pkg.Response"}
                ]}}}"##,
            ),
            &ResolveContext::usage(&schemas),
            &options,
        );
        assert_eq!(shape, usage("pkg_Response"));
    }

    #[test]
    fn test_no_success_response() {
        assert!(infer(r#"{"404":{"description":"missing"}}"#).is_unresolved());
        assert!(infer(r#"{"200":{"description":"no body"}}"#).is_unresolved());
        assert!(infer(r#"{}"#).is_unresolved());
    }

    #[test]
    fn test_unhelpful_composition() {
        let shape = infer(r##"{"200":{"schema":{"allOf":[{"$ref":"#/definitions/pkg.Response"}]}}}"##);
        assert!(shape.is_unresolved());
    }
}
