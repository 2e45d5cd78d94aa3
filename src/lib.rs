// docsync - Swagger 2.0 documents from Rust types, synchronized into Apifox
//
// Types describe themselves through `#[derive(Describe)]`, registered APIs
// are assembled into one Swagger document, and the document is exported to
// disk or imported into an Apifox project folder.

// Re-export schema inference and document assembly
pub use docsync_schema::*;

// Re-export optional crates
#[cfg(feature = "apifox")]
pub use docsync_apifox;

#[cfg(feature = "http-client")]
pub use docsync_http_client;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ApiDescriptor, Describe, DocumentAssembler, DocumentMeta, Method, ParameterBuilder,
        SchemaBuilder, SwaggerDocument, TypeDescriptor, assemble, schema_for,
    };

    #[cfg(feature = "apifox")]
    pub use docsync_apifox::{
        ApiOverwriteMode, ApifoxClient, ApifoxConfig, SchemaOverwriteMode, SyncOutcome,
        SyncRequest,
    };
}
