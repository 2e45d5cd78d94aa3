//! Derive macros for docsync
//!
//! `#[derive(Describe)]` implements `docsync_schema::Describe`, producing the
//! structural descriptor the schema builder walks.
//!
//! ## Field attributes
//!
//! - `#[schema(title = "...")]` - property title
//! - `#[schema(remark = "...")]` - property description (doc comments are used
//!   when absent)
//! - `#[schema(binding = "required,gt=0")]` - validation rules; `required`
//!   marks the property required
//! - `#[schema(rename = "...")]` / `#[serde(rename = "...")]` - wire name
//! - `#[schema(flatten)]` / `#[serde(flatten)]` - embed the field's struct
//! - `#[schema(skip)]` / `#[serde(skip)]` - leave the field out
//!
//! ## Container attributes
//!
//! - `#[serde(rename_all = "camelCase")]` - applied to every unrenamed field
//! - `#[schema(identity = "...")]` - override the identity string
//!
//! Generated code refers to `::docsync_schema`, which must be a dependency of
//! the deriving crate.

use proc_macro::TokenStream;

mod attrs;
mod describe;

/// Derive `docsync_schema::Describe`
///
/// # Examples
///
/// ```ignore
/// #[derive(Describe)]
/// #[serde(rename_all = "camelCase")]
/// struct UserRequest {
///     #[schema(title = "Name", binding = "required")]
///     user_name: String,
///     /// Age in years
///     #[schema(binding = "required,gt=0,lt=100")]
///     age: u8,
///     #[serde(flatten)]
///     paging: Paging,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(schema))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe::derive_describe_impl(input)
}
