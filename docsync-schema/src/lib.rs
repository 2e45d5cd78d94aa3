//! Swagger 2.0 schema inference for registered HTTP APIs
//!
//! This crate derives inline JSON schemas from structural type descriptors
//! and assembles them, together with the registered routes, into a Swagger
//! 2.0 document.
//!
//! ## Features
//!
//! - **Type descriptors** - shallow, lazily resolved views of Rust types
//! - **Schema inference** - primitives, sequences, maps, embedded structs,
//!   required flags, titles and remarks
//! - **Cycle safe** - self-referential and mutually recursive types terminate
//! - **Query flattening** - GET request structs become query parameters
//! - **Envelope aware** - `result::Result { data }` responses document the payload
//!
//! ## Quick Start
//!
//! ```
//! use docsync_schema::{ApiDescriptor, DocumentMeta, FieldDescriptor, TypeDescriptor, TypeRef};
//! use docsync_schema::{Describe, assemble};
//!
//! struct Login;
//!
//! impl Describe for Login {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::structure("app::Login")
//!             .field(FieldDescriptor::new("Account", TypeRef::of::<String>()).binding("required"))
//!             .field(FieldDescriptor::new("Password", TypeRef::of::<String>()).binding("required"))
//!     }
//! }
//!
//! let apis = vec![ApiDescriptor::post::<Login, bool>("/auth", "login").remark("Sign in")];
//! let doc = assemble(&apis, &DocumentMeta::new().title("Auth API")).unwrap();
//!
//! let op = doc.paths["/auth/login"].post.as_ref().unwrap();
//! assert_eq!(op.parameters[0].name, "body");
//! assert_eq!(doc.info.title, "Auth API");
//! ```

pub mod builder;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod parameters;
pub mod spec;

pub use builder::*;
pub use descriptor::*;
pub use document::*;
pub use error::{Result, SchemaError};
pub use parameters::*;
pub use spec::*;

#[cfg(feature = "derive")]
pub use docsync_macros::Describe;
