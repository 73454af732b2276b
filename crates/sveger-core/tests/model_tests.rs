use sveger_core::ir::{
    BodySource, ClientModel, HttpMethod, PrimitiveKind, RefScope, Resource, TypeShape,
};
use sveger_core::parse;
use sveger_core::transform::{InferenceOptions, ModelOptions, build_model};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const PETSTORE_V2: &str = include_str!("fixtures/petstore-v2.json");
const ENVELOPE: &str = include_str!("fixtures/envelope.json");
const CYCLIC: &str = include_str!("fixtures/cyclic.yaml");

fn model_yaml(input: &str) -> ClientModel {
    build_model(&parse::from_yaml(input).unwrap(), &ModelOptions::default())
}

fn model_json(input: &str) -> ClientModel {
    build_model(&parse::from_json(input).unwrap(), &ModelOptions::default())
}

fn type_names(resource: &Resource) -> Vec<&str> {
    resource.types.keys().map(String::as_str).collect()
}

fn usage(name: &str) -> TypeShape {
    TypeShape::reference(name, RefScope::Usage)
}

#[test]
fn petstore_resources() {
    let model = model_yaml(PETSTORE);
    assert_eq!(model.resource_names(), vec!["orders", "pets"]);

    let pets = model.resource("pets").unwrap();
    let methods: Vec<&str> = pets.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["listPets", "showPetById"]);
    assert_eq!(type_names(pets), vec!["Category", "Error", "Pet", "PetStatus"]);

    let orders = model.resource("orders").unwrap();
    assert_eq!(orders.methods.len(), 1);
    assert_eq!(orders.methods[0].name, "getOrdersByOrderId");
    assert_eq!(type_names(orders), vec!["Order", "OrderLine"]);
}

#[test]
fn petstore_signatures() {
    let model = model_yaml(PETSTORE);
    let pets = model.resource("pets").unwrap();

    let list = &pets.methods[0];
    assert_eq!(list.method, HttpMethod::Get);
    assert_eq!(list.return_type, TypeShape::array(usage("Pet")));
    let query: Vec<(&str, bool)> = list
        .query_params
        .iter()
        .map(|p| (p.name.as_str(), p.required))
        .collect();
    assert_eq!(query, vec![("limit", false), ("status", false)]);

    let show = &pets.methods[1];
    assert_eq!(show.return_type, usage("Pet"));
    assert_eq!(show.path_params.len(), 1);
    assert_eq!(
        show.path_params[0].param_type,
        TypeShape::Primitive(PrimitiveKind::Number)
    );
}

#[test]
fn dialects_produce_equivalent_models() {
    let v3 = model_yaml(PETSTORE);
    let v2 = model_json(PETSTORE_V2);
    assert_eq!(v3, v2);
}

#[test]
fn model_building_is_idempotent() {
    let doc = parse::from_json(ENVELOPE).unwrap();
    let options = ModelOptions::default();
    let first = build_model(&doc, &options);
    let second = build_model(&doc, &options);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn envelope_return_types() {
    let model = model_json(ENVELOPE);
    assert_eq!(model.resource_names(), vec!["company"]);
    let company = model.resource("company").unwrap();
    assert_eq!(company.name.original, "Company");
    assert_eq!(company.name.kebab_case, "company");

    let list = &company.methods[0];
    assert_eq!(list.name, "postCompanyList");
    let TypeShape::Object(ref envelope) = list.return_type else {
        panic!("expected envelope, got {:?}", list.return_type);
    };
    let TypeShape::Object(ref page) = envelope["data"].shape else {
        panic!("expected page object");
    };
    assert_eq!(
        page["data"].shape,
        TypeShape::array(usage("company_dto_CompanyResponse"))
    );
    assert_eq!(
        envelope["error"].shape,
        TypeShape::Primitive(PrimitiveKind::Boolean)
    );

    let body = list.request_body.as_ref().unwrap();
    assert_eq!(body.body_type, usage("company_dto_ListRequest"));
    assert_eq!(
        body.source,
        BodySource::BodyParameter {
            name: "request".into()
        }
    );

    let show = &company.methods[1];
    assert_eq!(show.name, "getCompanyById");
    assert_eq!(show.return_type, usage("company_dto_CompanyResponse"));

    let branches = &company.methods[2];
    assert_eq!(branches.name, "getCompanyByIdBranches");
    assert_eq!(
        branches.return_type,
        TypeShape::array(usage("company_dto_Branch"))
    );
}

#[test]
fn envelope_types_are_sanitized() {
    let model = model_json(ENVELOPE);
    let company = model.resource("company").unwrap();
    assert_eq!(
        type_names(company),
        vec![
            "company_dto_Branch",
            "company_dto_CompanyResponse",
            "company_dto_ListRequest",
            "company_dto_Status",
            "fiber_Map",
            "pkg_Paginated",
            "pkg_Response",
        ]
    );
    assert!(company.types["company_dto_Status"].is_named_enum());
}

#[test]
fn opaque_namespaces_are_configurable() {
    let doc = parse::from_json(ENVELOPE).unwrap();
    let options = ModelOptions {
        inference: InferenceOptions {
            opaque_namespaces: vec![],
        },
        ..ModelOptions::default()
    };
    let model = build_model(&doc, &options);
    let show = &model.resource("company").unwrap().methods[1];
    assert_eq!(show.return_type, usage("pkg_Response"));
}

#[test]
fn cyclic_schemas_terminate() {
    let model = model_yaml(CYCLIC);
    let employees = model.resource("employees").unwrap();
    assert_eq!(type_names(employees), vec!["Employee", "Manager"]);

    let TypeShape::Object(ref props) = employees.types["Manager"] else {
        panic!("expected object");
    };
    assert_eq!(
        props["team"].shape,
        TypeShape::array(TypeShape::reference("Employee", RefScope::Definition))
    );
    assert!(props["mentor"].shape.is_unresolved());
}

#[test]
fn connection_from_document() {
    let model = model_json(ENVELOPE);
    assert_eq!(model.connection.base_url, "https://localhost:8080/api/v1");
    assert_eq!(model.connection.timeout_ms, 10_000);
    assert_eq!(model.info.version, "0.4.0");
}
