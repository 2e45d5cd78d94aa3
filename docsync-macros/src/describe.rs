use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, FieldsNamed, parse_macro_input, parse_quote};

use crate::attrs::{ContainerAttrs, FieldAttrs, rename_field};

pub fn derive_describe_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::docsync_schema::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let identity = identity(input, &container);

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => struct_body(fields, &container)?,
            Fields::Unit => quote! {
                ::docsync_schema::TypeDescriptor::structure(__identity)
            },
            // Newtypes serialize as their inner value
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let ty = &fields.unnamed[0].ty;
                quote! {
                    {
                        let _ = __identity;
                        <#ty as ::docsync_schema::Describe>::describe()
                    }
                }
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Describe cannot be derived for tuple structs with several fields",
                ));
            }
        },
        Data::Enum(data) => {
            if data.variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
                quote! {
                    ::docsync_schema::TypeDescriptor::primitive(
                        ::docsync_schema::Kind::String,
                        __identity,
                    )
                }
            } else {
                quote! { ::docsync_schema::TypeDescriptor::unknown(__identity) }
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Describe cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::docsync_schema::Describe for #name #ty_generics #where_clause {
            fn describe() -> ::docsync_schema::TypeDescriptor {
                let __identity: ::std::string::String = #identity;
                #body
            }
        }
    })
}

fn identity(input: &DeriveInput, container: &ContainerAttrs) -> TokenStream2 {
    if let Some(identity) = &container.identity {
        return quote! { ::std::string::String::from(#identity) };
    }

    let name = input.ident.to_string();
    let params: Vec<_> = input.generics.type_params().map(|p| &p.ident).collect();
    if params.is_empty() {
        return quote! { ::std::format!("{}::{}", ::std::module_path!(), #name) };
    }

    quote! {
        {
            let args: ::std::vec::Vec<::std::string::String> = ::std::vec![
                #(<#params as ::docsync_schema::Describe>::describe().identity),*
            ];
            ::std::format!("{}::{}<{}>", ::std::module_path!(), #name, args.join(","))
        }
    }
}

fn struct_body(fields: &FieldsNamed, container: &ContainerAttrs) -> syn::Result<TokenStream2> {
    let mut field_exprs = Vec::new();

    for field in &fields.named {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let ident = ident.to_string();
        let ident = ident.strip_prefix("r#").unwrap_or(&ident).to_string();
        let ty = &field.ty;

        let rename = match (&attrs.rename, &container.rename_all) {
            (Some(rename), _) => Some(rename.clone()),
            (None, Some(rule)) => Some(rename_field(rule, &ident)?),
            (None, None) => None,
        };

        let mut expr = quote! {
            ::docsync_schema::FieldDescriptor::new(#ident, ::docsync_schema::TypeRef::of::<#ty>())
        };
        if let Some(rename) = rename {
            expr = quote! { #expr.rename(#rename) };
        }
        if attrs.flatten {
            expr = quote! { #expr.anonymous() };
        }
        if let Some(title) = &attrs.title {
            expr = quote! { #expr.title(#title) };
        }
        if let Some(remark) = &attrs.remark {
            expr = quote! { #expr.remark(#remark) };
        }
        if let Some(binding) = &attrs.binding {
            expr = quote! { #expr.binding(#binding) };
        }

        field_exprs.push(expr);
    }

    Ok(quote! {
        ::docsync_schema::TypeDescriptor::structure(__identity)
            #(.field(#field_exprs))*
    })
}
