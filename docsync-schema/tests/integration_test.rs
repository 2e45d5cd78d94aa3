//! Integration tests for docsync-schema

use docsync_schema::*;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Describe)]
struct UserRequest {
    #[schema(binding = "required", title = "Name", remark = "Display name")]
    name: String,
    #[schema(binding = "required,gt=0,lt=100", title = "Age", remark = "Age in years")]
    age: i32,
    #[schema(binding = "required")]
    user_info: Option<Box<UserInfo>>,
    nickname: Option<String>,
}

#[derive(Describe)]
struct UserInfo {
    /// 0 for male, 1 for female
    #[schema(binding = "required,gt=0,lt=5", title = "Sex")]
    sex: i32,
}

#[derive(Describe, Serialize)]
#[schema(rename_all = "camelCase")]
struct Paging {
    page_no: u32,
    page_size: u32,
}

#[derive(Describe, Serialize)]
struct Audit {
    #[schema(flatten)]
    paging: Paging,
    operator: String,
}

#[derive(Describe, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListUsers {
    #[serde(flatten)]
    audit: Audit,
    keyword: Option<String>,
    #[serde(rename = "ids")]
    user_ids: Vec<i64>,
    #[serde(skip)]
    internal: bool,
    tags: HashMap<String, String>,
}

#[derive(Describe)]
struct Category {
    name: String,
    children: Vec<Category>,
    parent: Option<Box<Category>>,
}

#[derive(Describe)]
struct Directory {
    name: String,
    entries: HashMap<String, Directory>,
}

#[derive(Describe)]
struct Webhook {
    url: String,
    payload: serde_json::Value,
    headers: HashMap<String, serde_json::Value>,
}

#[derive(Describe)]
struct BadLookup {
    by_id: HashMap<u64, String>,
}

mod result {
    use docsync_schema::Describe;

    #[derive(Describe)]
    pub struct Result<T> {
        pub success: bool,
        pub data: Option<Box<T>>,
    }
}

#[derive(Describe)]
struct Page<T> {
    total: u64,
    items: Vec<T>,
}

#[derive(Describe)]
enum Status {
    Active,
    Disabled,
}

#[derive(Describe)]
struct UserId(u64);

#[test]
fn test_struct_schema_with_tags() {
    let schema = schema_for::<UserRequest>().unwrap().unwrap();

    assert_eq!(schema.schema_type, Some(SchemaType::Object));
    assert_eq!(schema.required, vec!["name", "age", "user_info"]);

    let name = schema.property("name").unwrap();
    assert_eq!(name.title, "Name");
    assert_eq!(name.description, "Display name");

    let info = schema.property("user_info").unwrap();
    assert_eq!(info.schema_type, Some(SchemaType::Object));
    let sex = info.property("sex").unwrap();
    assert_eq!(sex.schema_type, Some(SchemaType::Integer));
    assert_eq!(sex.description, "0 for male, 1 for female");

    let nickname = schema.property("nickname").unwrap();
    assert_eq!(nickname.schema_type, Some(SchemaType::String));
    assert!(nickname.title.is_empty());
    assert!(nickname.description.is_empty());
}

#[test]
fn test_serde_attributes_and_nested_embedding() {
    let schema = schema_for::<ListUsers>().unwrap().unwrap();
    let keys: Vec<&str> = schema
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys, ["pageNo", "pageSize", "operator", "keyword", "ids", "tags"]);
}

#[test]
fn test_query_flattening_uses_member_names() {
    let parameters = ParameterBuilder::default()
        .query_parameters(&Audit::describe())
        .unwrap();
    let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, ["pageNo", "pageSize", "operator"]);
}

#[test]
fn test_self_referential_type_is_finite() {
    let schema = schema_for::<Category>().unwrap().unwrap();

    let children = schema.property("children").unwrap();
    assert_eq!(children.schema_type, Some(SchemaType::Array));
    assert!(children.items.is_none());

    let parent = schema.property("parent").unwrap();
    assert_eq!(parent.schema_type, Some(SchemaType::Object));
    assert!(parent.properties.is_none());
}

#[test]
fn test_recursion_through_map_values_is_finite() {
    let schema = schema_for::<Directory>().unwrap().unwrap();

    let entries = schema.property("entries").unwrap();
    let value = entries.additional_properties.as_ref().unwrap();
    assert_eq!(value.schema_type, Some(SchemaType::Object));
    assert!(value.properties.is_none());
}

#[test]
fn test_json_value_fields_are_free_form() {
    let schema = schema_for::<Webhook>().unwrap().unwrap();

    assert_eq!(schema.property("payload"), Some(&Schema::default()));
    let headers = schema.property("headers").unwrap();
    assert_eq!(headers.schema_type, Some(SchemaType::Object));
    assert_eq!(headers.additional_properties.as_deref(), Some(&Schema::default()));
}

#[test]
fn test_non_string_map_key_is_fatal() {
    let err = schema_for::<BadLookup>().unwrap_err();
    assert!(matches!(err, SchemaError::NonStringMapKey { .. }));

    let apis = [ApiDescriptor::get::<BadLookup, ()>("/lookup", "find")];
    assert!(assemble(&apis, &DocumentMeta::new()).is_err());
}

#[test]
fn test_envelope_documents_payload() {
    let schema = schema_for::<result::Result<UserInfo>>().unwrap().unwrap();

    let data = schema.property("data").unwrap();
    let direct = schema_for::<UserInfo>().unwrap().unwrap();
    assert_eq!(data.properties, direct.properties);
    assert_eq!(data.required, direct.required);
}

#[test]
fn test_envelope_unwrapping_can_be_disabled() {
    let builder = SchemaBuilder::new().without_envelope_markers();
    let schema = builder.build_for::<result::Result<UserInfo>>().unwrap().unwrap();

    // pointers are unwrapped anyway, the payload schema is the same
    let data = schema.property("data").unwrap();
    assert!(data.property("sex").is_some());
}

#[test]
fn test_generic_identity() {
    let desc = <Page<UserInfo>>::describe();
    assert!(desc.identity.ends_with("Page<integration_test::UserInfo>"));

    let schema = schema_for::<Page<UserInfo>>().unwrap().unwrap();
    let items = schema.property("items").unwrap();
    assert!(items.items.as_ref().unwrap().property("sex").is_some());
}

#[test]
fn test_enums_and_newtypes() {
    assert_eq!(Status::describe().kind, Kind::String);
    assert_eq!(UserId::describe().kind, Kind::Integer);
}

#[test]
fn test_document_shape() {
    let apis = vec![
        ApiDescriptor::get::<ListUsers, Page<UserRequest>>("/users", "/list").remark("List users"),
        ApiDescriptor::post::<UserRequest, result::Result<UserInfo>>("/users/", "create"),
        ApiDescriptor::new(Method::Get, "/health", ""),
    ];
    let doc = assemble(&apis, &DocumentMeta::new().title("Users")).unwrap();
    let json: serde_json::Value = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["swagger"], "2.0");
    assert_eq!(json["info"]["title"], "Users");

    let list = &json["paths"]["/users/list"]["get"];
    assert_eq!(list["summary"], "List users");
    assert_eq!(list["parameters"][0]["in"], "query");
    assert_eq!(list["responses"]["200"]["schema"]["type"], "object");

    let create = &json["paths"]["/users/create"]["post"];
    assert_eq!(create["parameters"][0]["in"], "body");
    assert_eq!(create["parameters"][0]["required"], true);

    let health = &json["paths"]["/health/"]["get"];
    assert!(health.get("parameters").is_none());
    assert!(health["responses"]["200"].get("schema").is_none());
}

#[test]
fn test_export_writes_openapi_json() {
    let dir = tempfile::tempdir().unwrap();
    let apis = [ApiDescriptor::post::<UserRequest, ()>("/users", "create")];
    let doc = assemble(&apis, &DocumentMeta::new()).unwrap();

    let file = doc.export(dir.path().join("openapi/v1")).unwrap();
    assert!(file.ends_with("openapi/v1/openapi.json"));

    let written: SwaggerDocument =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(written, doc);
}
