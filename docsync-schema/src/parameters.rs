//! Operation parameters from request types

use crate::builder::{SchemaBuilder, ensure_string_key, primitive_type};
use crate::descriptor::{Kind, TypeDescriptor};
use crate::document::{ApiDescriptor, Method};
use crate::error::Result;
use crate::spec::{Parameter, Schema, SchemaType};
use tracing::warn;

/// Builds the parameter list of an operation.
///
/// GET requests are flattened into query parameters, everything else is
/// documented as a single required `body` parameter.
#[derive(Debug, Clone, Default)]
pub struct ParameterBuilder {
    schemas: SchemaBuilder,
}

impl ParameterBuilder {
    pub fn new(schemas: SchemaBuilder) -> Self {
        Self { schemas }
    }

    /// The schema builder used for body parameters
    pub fn schemas(&self) -> &SchemaBuilder {
        &self.schemas
    }

    /// Parameters for one API. An absent request type yields none.
    pub fn build(&self, api: &ApiDescriptor) -> Result<Vec<Parameter>> {
        let Some(request) = api.request.map(|r| r.resolve()) else {
            return Ok(Vec::new());
        };

        match api.method {
            Method::Get => self.query_parameters(&request),
            Method::Post => self.body_parameters(&request),
        }
    }

    /// Flatten a request struct into query parameters
    pub fn query_parameters(&self, ty: &TypeDescriptor) -> Result<Vec<Parameter>> {
        let mut parameters = Vec::new();
        let mut expanding = Vec::new();
        collect_query(ty.clone(), &mut expanding, &mut parameters)?;
        Ok(parameters)
    }

    /// Wrap the whole request type into one required body parameter
    pub fn body_parameters(&self, ty: &TypeDescriptor) -> Result<Vec<Parameter>> {
        let schema = self.schemas.build(ty, 0)?;
        let mut body = Parameter::body("body", schema);
        body.required = true;
        Ok(vec![body])
    }
}

fn collect_query(
    ty: TypeDescriptor,
    expanding: &mut Vec<String>,
    parameters: &mut Vec<Parameter>,
) -> Result<()> {
    let ty = ty.unwrap_pointers();
    if ty.kind != Kind::Struct || expanding.contains(&ty.identity) {
        return Ok(());
    }

    expanding.push(ty.identity.clone());
    for field in &ty.fields {
        let field_ty = field.ty.resolve();
        if field.anonymous {
            collect_query(field_ty, expanding, parameters)?;
            continue;
        }

        let field_ty = field_ty.unwrap_pointers();
        let mut parameter = Parameter::query(&field.name);

        match field_ty.kind {
            Kind::String | Kind::Bool | Kind::Integer | Kind::Float => {
                parameter.param_type = primitive_type(field_ty.kind);
            }
            Kind::Slice | Kind::Array => {
                parameter.param_type = Some(SchemaType::Array);
                parameter.items = field_ty
                    .element()
                    .and_then(|e| primitive_type(e.unwrap_pointers().kind))
                    .map(|t| Box::new(Schema::of_type(t)));
            }
            Kind::Map => {
                ensure_string_key(&field_ty)?;
                continue;
            }
            Kind::Struct | Kind::Pointer | Kind::Unknown => {
                warn!(
                    field = %field.name,
                    identity = %field_ty.identity,
                    "unsupported query parameter type"
                );
            }
        }

        parameter.required = field.is_required();
        parameter.description = field.description.clone();
        parameters.push(parameter);
    }
    expanding.pop();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Describe, FieldDescriptor, TypeRef};
    use crate::spec::ParameterLocation;
    use std::collections::{BTreeMap, HashMap};

    fn paging() -> TypeDescriptor {
        TypeDescriptor::structure("tests::Paging")
            .field(FieldDescriptor::new("PageNo", TypeRef::of::<u32>()).binding("required,gt=0"))
            .field(FieldDescriptor::new("PageSize", TypeRef::of::<u32>()).remark("rows per page"))
    }

    fn query() -> TypeDescriptor {
        TypeDescriptor::structure("tests::Query")
            .field(FieldDescriptor::new("Paging", TypeRef::new(paging)).anonymous())
            .field(FieldDescriptor::new("Keyword", TypeRef::of::<Option<String>>()))
            .field(FieldDescriptor::new("Ids", TypeRef::of::<Vec<i64>>()))
            .field(FieldDescriptor::new("Extra", TypeRef::of::<HashMap<String, String>>()))
    }

    fn bad_query() -> TypeDescriptor {
        TypeDescriptor::structure("tests::BadQuery")
            .field(FieldDescriptor::new("Lookup", TypeRef::of::<BTreeMap<i32, String>>()))
    }

    fn names(parameters: &[Parameter]) -> Vec<&str> {
        parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_embedded_struct_is_flattened() {
        let parameters = ParameterBuilder::default().query_parameters(&paging()).unwrap();
        assert_eq!(names(&parameters), ["pageNo", "pageSize"]);

        let wrapper = TypeDescriptor::structure("tests::Wrapper")
            .field(FieldDescriptor::new("Paging", TypeRef::new(paging)).anonymous());
        let parameters = ParameterBuilder::default().query_parameters(&wrapper).unwrap();
        assert_eq!(names(&parameters), ["pageNo", "pageSize"]);
    }

    #[test]
    fn test_query_parameter_types() {
        let parameters = ParameterBuilder::default().query_parameters(&query()).unwrap();
        assert_eq!(names(&parameters), ["pageNo", "pageSize", "keyword", "ids"]);

        assert!(parameters.iter().all(|p| p.location == ParameterLocation::Query));
        assert_eq!(parameters[0].param_type, Some(SchemaType::Integer));
        assert!(parameters[0].required);
        assert!(!parameters[1].required);
        assert_eq!(parameters[1].description, "rows per page");
        assert_eq!(parameters[2].param_type, Some(SchemaType::String));
        assert_eq!(parameters[3].param_type, Some(SchemaType::Array));
        assert_eq!(
            parameters[3].items.as_ref().unwrap().schema_type,
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn test_non_struct_query_yields_nothing() {
        let parameters = ParameterBuilder::default()
            .query_parameters(&<String>::describe())
            .unwrap();
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_query_map_key_is_validated() {
        assert!(ParameterBuilder::default().query_parameters(&bad_query()).is_err());
    }

    #[test]
    fn test_body_parameter() {
        let parameters = ParameterBuilder::default().body_parameters(&query()).unwrap();
        assert_eq!(parameters.len(), 1);

        let body = &parameters[0];
        assert_eq!(body.name, "body");
        assert_eq!(body.location, ParameterLocation::Body);
        assert!(body.required);
        let schema = body.schema.as_ref().unwrap();
        assert_eq!(schema.required, vec!["pageNo".to_string()]);
        assert!(schema.property("extra").is_some());
    }

    #[test]
    fn test_absent_request_yields_nothing() {
        let builder = ParameterBuilder::default();
        let get = ApiDescriptor::new(Method::Get, "/a", "b");
        let post = ApiDescriptor::new(Method::Post, "/a", "b");
        assert!(builder.build(&get).unwrap().is_empty());
        assert!(builder.build(&post).unwrap().is_empty());
    }
}
