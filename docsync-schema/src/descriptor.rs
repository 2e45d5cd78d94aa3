//! Structural type descriptors
//!
//! A [`TypeDescriptor`] is a minimal, shallow view of a Rust type: its kind,
//! the contained type for wrappers and collections, and for structs the
//! ordered list of fields. Nested types are referenced through [`TypeRef`],
//! which resolves lazily, so describing a self-referential type never
//! recurses.
//!
//! Descriptors are usually produced by `#[derive(Describe)]`, but they can be
//! populated by hand:
//!
//! ```
//! use docsync_schema::{Describe, FieldDescriptor, Kind, TypeDescriptor, TypeRef};
//!
//! fn user() -> TypeDescriptor {
//!     TypeDescriptor::structure("app::User")
//!         .field(FieldDescriptor::new("Name", TypeRef::of::<String>()).binding("required"))
//!         .field(FieldDescriptor::new("friends", TypeRef::of::<Vec<u32>>()))
//! }
//!
//! let desc = user();
//! assert_eq!(desc.kind, Kind::Struct);
//! assert_eq!(desc.fields[0].name, "name");
//! assert!(desc.fields[0].is_required());
//! assert_eq!(desc.fields[1].ty.resolve().identity, "[]u32");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Structural kind of a described type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    Integer,
    Float,
    Slice,
    Array,
    Map,
    Struct,
    Pointer,
    Unknown,
}

impl Kind {
    /// Whether this kind is a sequence (slice or fixed array)
    pub fn is_sequence(&self) -> bool {
        matches!(self, Kind::Slice | Kind::Array)
    }
}

/// Types that can describe their own structure
pub trait Describe {
    /// Shallow descriptor for this type
    fn describe() -> TypeDescriptor;
}

/// Lazily resolved reference to a type descriptor
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> TypeDescriptor);

impl TypeRef {
    /// Wrap a descriptor-producing function
    pub const fn new(describe: fn() -> TypeDescriptor) -> Self {
        Self(describe)
    }

    /// Reference to the descriptor of `T`
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self(T::describe)
    }

    /// Produce the referenced descriptor
    pub fn resolve(&self) -> TypeDescriptor {
        (self.0)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.resolve().identity).finish()
    }
}

/// One node of a type traversal
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Structural kind
    pub kind: Kind,
    /// Unique name of the concrete type, used for cycle detection
    pub identity: String,
    /// Pointee, element or map value type
    pub element: Option<TypeRef>,
    /// Map key type
    pub key: Option<TypeRef>,
    /// Struct fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    fn bare(kind: Kind, identity: impl Into<String>) -> Self {
        Self {
            kind,
            identity: identity.into(),
            element: None,
            key: None,
            fields: Vec::new(),
        }
    }

    /// Primitive (string, bool, integer or float) descriptor
    pub fn primitive(kind: Kind, identity: impl Into<String>) -> Self {
        Self::bare(kind, identity)
    }

    /// Descriptor for a type with no schema representation
    pub fn unknown(identity: impl Into<String>) -> Self {
        Self::bare(Kind::Unknown, identity)
    }

    /// Pointer-like wrapper (`Option`, `Box`, references, ...)
    pub fn pointer(element: TypeRef) -> Self {
        Self {
            element: Some(element),
            ..Self::bare(Kind::Pointer, format!("*{}", element.resolve().identity))
        }
    }

    /// Growable sequence
    pub fn slice(element: TypeRef) -> Self {
        Self {
            element: Some(element),
            ..Self::bare(Kind::Slice, format!("[]{}", element.resolve().identity))
        }
    }

    /// Fixed-length sequence
    pub fn array(element: TypeRef, len: usize) -> Self {
        Self {
            element: Some(element),
            ..Self::bare(
                Kind::Array,
                format!("[{}]{}", len, element.resolve().identity),
            )
        }
    }

    /// Keyed map
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self {
            element: Some(value),
            key: Some(key),
            ..Self::bare(
                Kind::Map,
                format!(
                    "map[{}]{}",
                    key.resolve().identity,
                    value.resolve().identity
                ),
            )
        }
    }

    /// Struct with no fields yet
    pub fn structure(identity: impl Into<String>) -> Self {
        Self::bare(Kind::Struct, identity)
    }

    /// Append a field
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Resolved element type, if any
    pub fn element(&self) -> Option<TypeDescriptor> {
        self.element.map(|e| e.resolve())
    }

    /// Resolved key type, if any
    pub fn key(&self) -> Option<TypeDescriptor> {
        self.key.map(|k| k.resolve())
    }

    /// Strip every pointer layer. A pointer without a pointee stays as is.
    pub fn unwrap_pointers(self) -> TypeDescriptor {
        let mut current = self;
        while current.kind == Kind::Pointer {
            match current.element() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Strip pointer and sequence layers down to the innermost type
    pub fn core(self) -> TypeDescriptor {
        let mut current = self;
        while current.kind == Kind::Pointer || current.kind.is_sequence() {
            match current.element() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }
}

/// One struct field
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Name of the field in source
    pub ident: String,
    /// Wire-level key
    pub name: String,
    /// Embedded (flattened) rather than a named member
    pub anonymous: bool,
    /// Field type
    pub ty: TypeRef,
    /// Title tag
    pub title: String,
    /// Remark tag
    pub description: String,
    /// Validation rules, comma separated
    pub binding: String,
}

impl FieldDescriptor {
    /// Field named after its identifier with the first letter lower-cased
    pub fn new(ident: impl Into<String>, ty: TypeRef) -> Self {
        let ident = ident.into();
        Self {
            name: default_field_name(&ident),
            ident,
            anonymous: false,
            ty,
            title: String::new(),
            description: String::new(),
            binding: String::new(),
        }
    }

    /// Override the wire-level key
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark as embedded
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.description = remark.into();
        self
    }

    pub fn binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    /// True when one of the validation rules is `required`
    pub fn is_required(&self) -> bool {
        self.binding.split(',').any(|rule| rule.trim() == "required")
    }

    /// Title, falling back to the remark
    pub fn effective_title(&self) -> &str {
        if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        }
    }
}

/// Lower-case the first character of a field identifier
pub fn default_field_name(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut chars = ident.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

macro_rules! describe_primitive {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::primitive($kind, stringify!($ty))
                }
            }
        )+
    };
}

describe_primitive!(Kind::String => String, str, char);
describe_primitive!(Kind::Bool => bool);
describe_primitive!(
    Kind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
describe_primitive!(Kind::Float => f32, f64);

macro_rules! describe_pointer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::pointer(TypeRef::of::<T>())
                }
            }
        )+
    };
}

describe_pointer!(Box<T>, Rc<T>, Arc<T>, &T);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::pointer(TypeRef::of::<T>())
    }
}

macro_rules! describe_sequence {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: Describe> Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::slice(TypeRef::of::<T>())
                }
            }
        )+
    };
}

describe_sequence!(Vec<T>, VecDeque<T>, LinkedList<T>, BTreeSet<T>, [T]);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::slice(TypeRef::of::<T>())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(TypeRef::of::<T>(), N)
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(TypeRef::of::<K>(), TypeRef::of::<V>())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(TypeRef::of::<K>(), TypeRef::of::<V>())
    }
}

/// The unit type documents as an empty object
impl Describe for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::structure("()")
    }
}

/// Free-form JSON has no structure to document
impl Describe for serde_json::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::unknown("serde_json::Value")
    }
}
