use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// Container-level options
#[derive(Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<LitStr>,
    pub identity: Option<String>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("identity") {
                        parsed.identity = Some(meta.value()?.parse::<LitStr>()?.value());
                        Ok(())
                    } else if meta.path.is_ident("rename_all") {
                        parsed.rename_all = Some(meta.value()?.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error("unknown schema container attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                        // schema(rename_all) takes precedence
                        let value: LitStr = meta.value()?.parse()?;
                        parsed.rename_all.get_or_insert(value);
                        Ok(())
                    } else {
                        skip_meta(meta)
                    }
                })?;
            }
        }

        Ok(parsed)
    }
}

/// Field-level options
#[derive(Default)]
pub struct FieldAttrs {
    pub title: Option<String>,
    pub remark: Option<String>,
    pub binding: Option<String>,
    pub rename: Option<String>,
    pub flatten: bool,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        let mut serde_rename = None;

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("title") {
                        parsed.title = Some(string_value(&meta)?);
                    } else if meta.path.is_ident("remark") {
                        parsed.remark = Some(string_value(&meta)?);
                    } else if meta.path.is_ident("binding") {
                        parsed.binding = Some(string_value(&meta)?);
                    } else if meta.path.is_ident("rename") {
                        parsed.rename = Some(string_value(&meta)?);
                    } else if meta.path.is_ident("flatten") {
                        parsed.flatten = true;
                    } else if meta.path.is_ident("skip") {
                        parsed.skip = true;
                    } else {
                        return Err(meta.error("unknown schema field attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                        serde_rename = Some(string_value(&meta)?);
                        Ok(())
                    } else if meta.path.is_ident("flatten") {
                        parsed.flatten = true;
                        Ok(())
                    } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        parsed.skip = true;
                        Ok(())
                    } else {
                        skip_meta(meta)
                    }
                })?;
            }
        }

        if parsed.rename.is_none() {
            parsed.rename = serde_rename;
        }
        if parsed.remark.is_none() {
            parsed.remark = doc_comment(attrs);
        }

        Ok(parsed)
    }
}

fn string_value(meta: &ParseNestedMeta) -> syn::Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value())
}

/// Consume an attribute entry we do not interpret
fn skip_meta(meta: ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(skip_meta)?;
    }
    Ok(())
}

/// Joined `///` lines, trimmed
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Apply a serde `rename_all` rule to a field identifier
pub fn rename_field(rule: &LitStr, ident: &str) -> syn::Result<String> {
    let renamed = match rule.value().as_str() {
        "lowercase" => ident.to_lowercase(),
        "UPPERCASE" => ident.to_uppercase(),
        "PascalCase" => ident.to_upper_camel_case(),
        "camelCase" => ident.to_lower_camel_case(),
        "snake_case" => ident.to_snake_case(),
        "SCREAMING_SNAKE_CASE" => ident.to_shouty_snake_case(),
        "kebab-case" => ident.to_kebab_case(),
        "SCREAMING-KEBAB-CASE" => ident.to_shouty_kebab_case(),
        other => {
            return Err(syn::Error::new(
                rule.span(),
                format!("unsupported rename_all rule `{}`", other),
            ));
        }
    };
    Ok(renamed)
}
