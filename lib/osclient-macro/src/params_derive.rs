//! Params derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Type, parse2};

/// Struct-level options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsStructOptions {
    /// Fixed `format` parameter added to every encoding.
    format: Option<String>,
}

/// Field options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsFieldOptions {
    /// Never encode this field.
    skip: bool,
    /// Parameter name, when it differs from the field name.
    rename: Option<String>,
}

/// How a field is encoded, decided from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// `Option<T>`: emitted when `Some`.
    Optional,
    /// `Vec<T>`: emitted comma-joined when non-empty.
    List,
    /// `String`: emitted when non-empty.
    Text,
    /// `bool`: emitted as `true` when set.
    Flag,
    /// Anything else: always emitted.
    Value,
}

/// Expand the `#[derive(Params)]` macro.
pub fn expand_params_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(expand_impl(
                    name,
                    &impl_generics,
                    &ty_generics,
                    where_clause,
                    &[],
                    struct_options.format.as_deref(),
                ));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Params derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Params derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        let key = options
            .rename
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        field_handlers.push(generate_field_handler(
            field_name,
            field_kind(&field.ty),
            &key,
        ));
    }

    Ok(expand_impl(
        name,
        &impl_generics,
        &ty_generics,
        where_clause,
        &field_handlers,
        struct_options.format.as_deref(),
    ))
}

fn expand_impl(
    name: &syn::Ident,
    impl_generics: &syn::ImplGenerics<'_>,
    ty_generics: &syn::TypeGenerics<'_>,
    where_clause: Option<&syn::WhereClause>,
    field_handlers: &[TokenStream],
    format: Option<&str>,
) -> TokenStream {
    let format_handler = format.map(|format| {
        quote! {
            params.insert("format".to_string(), #format.to_string());
        }
    });

    quote! {
        impl #impl_generics ::osclient::ToParams for #name #ty_generics #where_clause {
            fn to_params(&self) -> ::osclient::ParamMap {
                #[allow(unused_mut)]
                let mut params = ::osclient::ParamMap::new();
                #format_handler
                #(#field_handlers)*
                params
            }
        }
    }
}

/// Parse struct-level options from `#[params(...)]` attributes.
fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsStructOptions> {
    let mut options = ParamsStructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("format") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.format = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown params attribute, expected `format`"))
            }
        })?;
    }

    Ok(options)
}

/// Parse field options from `#[params(...)]` attributes.
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsFieldOptions> {
    let mut options = ParamsFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else {
                return Err(meta.error("unknown params attribute, expected `skip` or `rename`"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// Generate code for encoding a single field.
fn generate_field_handler(field_name: &syn::Ident, kind: FieldKind, key: &str) -> TokenStream {
    match kind {
        FieldKind::Optional => quote! {
            if let Some(ref value) = self.#field_name {
                params.insert(#key.to_string(), ::osclient::ParamValue::to_param(value));
            }
        },
        FieldKind::List => quote! {
            if !self.#field_name.is_empty() {
                params.insert(#key.to_string(), ::osclient::join_params(&self.#field_name));
            }
        },
        FieldKind::Text => quote! {
            if !self.#field_name.is_empty() {
                params.insert(#key.to_string(), self.#field_name.clone());
            }
        },
        FieldKind::Flag => quote! {
            if self.#field_name {
                params.insert(#key.to_string(), "true".to_string());
            }
        },
        FieldKind::Value => quote! {
            params.insert(#key.to_string(), ::osclient::ParamValue::to_param(&self.#field_name));
        },
    }
}

fn field_kind(ty: &Type) -> FieldKind {
    match last_segment_ident(ty) {
        Some(ident) if ident == "Option" => FieldKind::Optional,
        Some(ident) if ident == "Vec" => FieldKind::List,
        Some(ident) if ident == "String" => FieldKind::Text,
        Some(ident) if ident == "bool" => FieldKind::Flag,
        _ => FieldKind::Value,
    }
}

fn last_segment_ident(ty: &Type) -> Option<&syn::Ident> {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last().map(|seg| &seg.ident),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kinds() {
        let ty: Type = syn::parse_quote!(Option<Duration>);
        assert_eq!(field_kind(&ty), FieldKind::Optional);

        let ty: Type = syn::parse_quote!(Option<Vec<String>>);
        assert_eq!(field_kind(&ty), FieldKind::Optional);

        let ty: Type = syn::parse_quote!(Vec<ExpandWildcards>);
        assert_eq!(field_kind(&ty), FieldKind::List);

        let ty: Type = syn::parse_quote!(::std::string::String);
        assert_eq!(field_kind(&ty), FieldKind::Text);

        let ty: Type = syn::parse_quote!(bool);
        assert_eq!(field_kind(&ty), FieldKind::Flag);

        let ty: Type = syn::parse_quote!(u32);
        assert_eq!(field_kind(&ty), FieldKind::Value);
    }

    #[test]
    fn expands_format_and_renames() {
        let input = quote! {
            #[params(format = "json")]
            struct CatCountParams {
                #[params(rename = "s")]
                sort: Vec<String>,
                #[params(skip)]
                internal: u32,
                pretty: bool,
            }
        };

        let output = expand_params_derive(input).expect("expands").to_string();
        assert!(output.contains("ToParams for CatCountParams"));
        assert!(output.contains("\"format\""));
        assert!(output.contains("\"json\""));
        assert!(output.contains("\"s\""));
        assert!(!output.contains("\"sort\""));
        assert!(!output.contains("internal"));
        assert!(output.contains("\"pretty\""));
    }

    #[test]
    fn rejects_unknown_attribute() {
        let input = quote! {
            struct Bad {
                #[params(skip_none)]
                value: Option<u32>,
            }
        };
        assert!(expand_params_derive(input).is_err());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input = quote! {
            struct Bad(u32);
        };
        assert!(expand_params_derive(input).is_err());
    }
}
