//! Schema inference from type descriptors

use crate::descriptor::{Describe, FieldDescriptor, Kind, TypeDescriptor};
use crate::error::{Result, SchemaError};
use crate::spec::{Schema, SchemaType};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Deepest nesting level that still produces a schema
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Identity fragment of the shared `result::Result { success, data }` envelope
pub const DEFAULT_ENVELOPE_MARKER: &str = "result::Result";

/// Recursively turns type descriptors into inline schemas.
///
/// Struct expansion tracks the identities of every struct currently being
/// expanded, and none of them is expanded a second time. A field whose type
/// (after stripping pointers and sequences) is one of them becomes a shallow
/// `array` or `object` placeholder; one reached through a map value becomes
/// an `object` placeholder under `additionalProperties`.
///
/// Embedded fields are hoisted into the parent. If two embedded structs
/// expose the same key, the later one replaces the earlier one and a
/// warning is logged; which one wins is not part of the contract.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    max_depth: usize,
    envelope_markers: Vec<String>,
}

impl SchemaBuilder {
    /// Builder with the default depth bound and envelope marker
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            envelope_markers: vec![DEFAULT_ENVELOPE_MARKER.to_string()],
        }
    }

    /// Set the depth bound
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add an identity fragment that marks a type as a result envelope.
    ///
    /// The `data` field of an envelope has its pointer wrappers stripped.
    /// Pointers are transparent to schema building anyway, so the marker
    /// only changes the output when `data` would otherwise resolve to a
    /// bare pointer placeholder.
    pub fn envelope_marker(mut self, marker: impl Into<String>) -> Self {
        self.envelope_markers.push(marker.into());
        self
    }

    /// Disable envelope unwrapping
    pub fn without_envelope_markers(mut self) -> Self {
        self.envelope_markers.clear();
        self
    }

    /// Build a schema at the given depth.
    ///
    /// Returns `Ok(None)` once `depth` exceeds the bound; callers omit the
    /// property in that case.
    pub fn build(&self, ty: &TypeDescriptor, depth: usize) -> Result<Option<Schema>> {
        let mut expanding = Vec::new();
        self.build_node(ty.clone(), depth, &mut expanding)
    }

    /// Build the schema of a `Describe` type at depth 0
    pub fn build_for<T: Describe + ?Sized>(&self) -> Result<Option<Schema>> {
        self.build(&T::describe(), 0)
    }

    fn build_node(
        &self,
        ty: TypeDescriptor,
        depth: usize,
        expanding: &mut Vec<String>,
    ) -> Result<Option<Schema>> {
        if depth > self.max_depth {
            debug!(identity = %ty.identity, depth, "schema depth bound reached");
            return Ok(None);
        }

        let ty = ty.unwrap_pointers();
        let schema = match ty.kind {
            Kind::String | Kind::Bool | Kind::Integer | Kind::Float => {
                Schema::of_type(primitive_type(ty.kind).unwrap_or(SchemaType::String))
            }
            Kind::Slice | Kind::Array => {
                let items = match ty.element() {
                    Some(element) => self.build_node(element, depth + 1, expanding)?,
                    None => None,
                };
                Schema {
                    items: items.map(Box::new),
                    ..Schema::of_type(SchemaType::Array)
                }
            }
            Kind::Map => {
                ensure_string_key(&ty)?;
                let value = match ty.element() {
                    Some(value) => self.build_node(value, depth + 1, expanding)?,
                    None => None,
                };
                Schema {
                    additional_properties: value.map(Box::new),
                    ..Schema::of_type(SchemaType::Object)
                }
            }
            Kind::Struct if expanding.contains(&ty.identity) => {
                debug!(identity = %ty.identity, "recursive type, emitting a placeholder");
                Schema::of_type(SchemaType::Object)
            }
            Kind::Struct => self.build_struct(&ty, depth, expanding)?,
            Kind::Pointer | Kind::Unknown => {
                warn!(identity = %ty.identity, "unsupported type, emitting an empty schema");
                Schema::default()
            }
        };

        Ok(Some(schema))
    }

    fn build_struct(
        &self,
        ty: &TypeDescriptor,
        depth: usize,
        expanding: &mut Vec<String>,
    ) -> Result<Schema> {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        expanding.push(ty.identity.clone());
        let collected = self.collect_properties(ty, depth, expanding, &mut properties, &mut required);
        expanding.pop();
        collected?;

        Ok(Schema {
            properties: Some(properties),
            required,
            ..Schema::of_type(SchemaType::Object)
        })
    }

    fn collect_properties(
        &self,
        owner: &TypeDescriptor,
        depth: usize,
        expanding: &mut Vec<String>,
        properties: &mut IndexMap<String, Schema>,
        required: &mut Vec<String>,
    ) -> Result<()> {
        for field in &owner.fields {
            if field.anonymous {
                let embedded = field.ty.resolve().unwrap_pointers();
                if embedded.kind != Kind::Struct {
                    debug!(field = %field.ident, "skipping non-struct embedded field");
                    continue;
                }
                if expanding.contains(&embedded.identity) {
                    debug!(identity = %embedded.identity, "skipping recursive embedding");
                    continue;
                }

                expanding.push(embedded.identity.clone());
                let collected =
                    self.collect_properties(&embedded, depth, expanding, properties, required);
                expanding.pop();
                collected?;
                continue;
            }

            let Some(mut property) = self.build_field(owner, field, depth, expanding)? else {
                continue;
            };

            property.title = field.effective_title().to_string();
            property.description = field.description.clone();

            if properties.insert(field.name.clone(), property).is_some() {
                warn!(
                    owner = %owner.identity,
                    name = %field.name,
                    "duplicate property name, keeping the last declaration"
                );
            }
            if field.is_required() && !required.contains(&field.name) {
                required.push(field.name.clone());
            }
        }

        Ok(())
    }

    fn build_field(
        &self,
        owner: &TypeDescriptor,
        field: &FieldDescriptor,
        depth: usize,
        expanding: &mut Vec<String>,
    ) -> Result<Option<Schema>> {
        let mut field_ty = field.ty.resolve();
        if self.is_envelope(owner) && field.ident.eq_ignore_ascii_case("data") {
            field_ty = field_ty.unwrap_pointers();
        }

        let core = field_ty.clone().core();
        if core.kind == Kind::Struct && expanding.contains(&core.identity) {
            let outer = field_ty.unwrap_pointers();
            let placeholder = if outer.kind.is_sequence() {
                SchemaType::Array
            } else {
                SchemaType::Object
            };
            return Ok(Some(Schema::of_type(placeholder)));
        }

        self.build_node(field_ty, depth + 1, expanding)
    }

    fn is_envelope(&self, ty: &TypeDescriptor) -> bool {
        self.envelope_markers
            .iter()
            .any(|marker| ty.identity.contains(marker.as_str()))
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema of a `Describe` type with the default builder
pub fn schema_for<T: Describe + ?Sized>() -> Result<Option<Schema>> {
    SchemaBuilder::new().build_for::<T>()
}

/// Schema type of a primitive kind
pub fn primitive_type(kind: Kind) -> Option<SchemaType> {
    match kind {
        Kind::String => Some(SchemaType::String),
        Kind::Bool => Some(SchemaType::Boolean),
        Kind::Integer => Some(SchemaType::Integer),
        Kind::Float => Some(SchemaType::Number),
        _ => None,
    }
}

/// Reject maps whose key is not string-like
pub(crate) fn ensure_string_key(map: &TypeDescriptor) -> Result<()> {
    let key = map.key().map(TypeDescriptor::unwrap_pointers);
    match key {
        Some(key) if key.kind == Kind::String => Ok(()),
        Some(key) => Err(SchemaError::NonStringMapKey {
            map: map.identity.clone(),
            key: key.identity,
        }),
        None => Err(SchemaError::NonStringMapKey {
            map: map.identity.clone(),
            key: "<missing>".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeRef;
    use std::collections::HashMap;

    fn tree_node() -> TypeDescriptor {
        TypeDescriptor::structure("tests::TreeNode")
            .field(FieldDescriptor::new("Label", TypeRef::of::<String>()))
            .field(FieldDescriptor::new("Children", TypeRef::new(tree_node_list)))
            .field(FieldDescriptor::new("Parent", TypeRef::new(tree_node_ptr)))
            .field(FieldDescriptor::new("ByName", TypeRef::new(tree_node_map)))
    }

    fn tree_node_map() -> TypeDescriptor {
        TypeDescriptor::map(TypeRef::of::<String>(), TypeRef::new(tree_node))
    }

    fn tree_node_list() -> TypeDescriptor {
        TypeDescriptor::slice(TypeRef::new(tree_node_ptr))
    }

    fn tree_node_ptr() -> TypeDescriptor {
        TypeDescriptor::pointer(TypeRef::new(tree_node))
    }

    fn ping() -> TypeDescriptor {
        TypeDescriptor::structure("tests::Ping")
            .field(FieldDescriptor::new("Pong", TypeRef::new(pong)))
    }

    fn pong() -> TypeDescriptor {
        TypeDescriptor::structure("tests::Pong")
            .field(FieldDescriptor::new("Ping", TypeRef::new(ping)))
    }

    fn deep(level: usize) -> TypeDescriptor {
        fn wrap(inner: fn() -> TypeDescriptor) -> TypeDescriptor {
            TypeDescriptor::slice(TypeRef::new(inner))
        }
        fn l0() -> TypeDescriptor {
            <i32>::describe()
        }
        fn l1() -> TypeDescriptor {
            wrap(l0)
        }
        fn l2() -> TypeDescriptor {
            wrap(l1)
        }
        fn l3() -> TypeDescriptor {
            wrap(l2)
        }
        fn l4() -> TypeDescriptor {
            wrap(l3)
        }
        [l0, l1, l2, l3, l4][level]()
    }

    #[test]
    fn test_primitives() {
        let builder = SchemaBuilder::new();
        let ty = |t: TypeDescriptor| builder.build(&t, 0).unwrap().unwrap().schema_type;

        assert_eq!(ty(<String>::describe()), Some(SchemaType::String));
        assert_eq!(ty(<bool>::describe()), Some(SchemaType::Boolean));
        assert_eq!(ty(<u8>::describe()), Some(SchemaType::Integer));
        assert_eq!(ty(<i64>::describe()), Some(SchemaType::Integer));
        assert_eq!(ty(<f32>::describe()), Some(SchemaType::Number));
        assert_eq!(ty(<Option<Box<f64>>>::describe()), Some(SchemaType::Number));
    }

    #[test]
    fn test_array_items() {
        let schema = schema_for::<Vec<String>>().unwrap().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        assert_eq!(
            schema.items.unwrap().schema_type,
            Some(SchemaType::String)
        );
    }

    #[test]
    fn test_map_value_becomes_additional_properties() {
        let schema = schema_for::<HashMap<String, Vec<i32>>>().unwrap().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        let value = schema.additional_properties.unwrap();
        assert_eq!(value.schema_type, Some(SchemaType::Array));
    }

    #[test]
    fn test_non_string_map_key_is_rejected() {
        let err = schema_for::<HashMap<u32, String>>().unwrap_err();
        assert!(matches!(err, SchemaError::NonStringMapKey { ref key, .. } if key == "u32"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let schema = SchemaBuilder::new().build(&tree_node(), 0).unwrap().unwrap();

        let children = schema.property("children").unwrap();
        assert_eq!(children.schema_type, Some(SchemaType::Array));
        assert!(children.items.is_none());

        let parent = schema.property("parent").unwrap();
        assert_eq!(parent.schema_type, Some(SchemaType::Object));
        assert!(parent.properties.is_none());

        let by_name = schema.property("byName").unwrap();
        let value = by_name.additional_properties.as_ref().unwrap();
        assert_eq!(value.schema_type, Some(SchemaType::Object));
        assert!(value.properties.is_none());
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let schema = SchemaBuilder::new().build(&ping(), 0).unwrap().unwrap();

        let pong = schema.property("pong").unwrap();
        assert_eq!(pong.schema_type, Some(SchemaType::Object));
        let back = pong.property("ping").unwrap();
        assert!(back.properties.is_none());
    }

    #[test]
    fn test_depth_bound() {
        let builder = SchemaBuilder::new().max_depth(2);
        assert!(builder.build(&<i32>::describe(), 3).unwrap().is_none());

        let schema = builder.build(&deep(4), 0).unwrap().unwrap();
        let level1 = schema.items.unwrap();
        let level2 = level1.items.unwrap();
        assert_eq!(level2.schema_type, Some(SchemaType::Array));
        assert!(level2.items.is_none());
    }

    #[test]
    fn test_unknown_kind_yields_empty_schema() {
        let schema = SchemaBuilder::new()
            .build(&TypeDescriptor::unknown("fn()"), 0)
            .unwrap()
            .unwrap();
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn test_json_value_field_is_empty() {
        let ty = TypeDescriptor::structure("tests::Event")
            .field(FieldDescriptor::new("Kind", TypeRef::of::<String>()))
            .field(FieldDescriptor::new("Payload", TypeRef::of::<serde_json::Value>()))
            .field(FieldDescriptor::new(
                "Extra",
                TypeRef::of::<HashMap<String, serde_json::Value>>(),
            ));
        let schema = SchemaBuilder::new().build(&ty, 0).unwrap().unwrap();

        assert_eq!(schema.property("payload"), Some(&Schema::default()));
        let extra = schema.property("extra").unwrap();
        assert_eq!(extra.additional_properties.as_deref(), Some(&Schema::default()));
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = SchemaBuilder::new();
        let first = serde_json::to_string(&builder.build(&tree_node(), 0).unwrap()).unwrap();
        let second = serde_json::to_string(&builder.build(&tree_node(), 0).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_primitive_type_mapping() {
        assert_eq!(primitive_type(Kind::Float), Some(SchemaType::Number));
        assert_eq!(primitive_type(Kind::Struct), None);
    }
}
