//! `#[derive(DeclaredSection)]`.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    DeriveInput, Ident, LitInt, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of the `#[section(...)]` attribute.
struct SectionArgs {
    key: Option<LitStr>,
    display_text: Option<LitStr>,
    limit: Option<u32>,
    route: Option<LitStr>,
    additional_data: Option<LitStr>,
}

impl Parse for SectionArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = SectionArgs {
            key: None,
            display_text: None,
            limit: None,
            route: None,
            additional_data: None,
        };

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "key" => set_once(&mut args.key, input.parse()?, &ident)?,
                "display_text" => set_once(&mut args.display_text, input.parse()?, &ident)?,
                "route" => set_once(&mut args.route, input.parse()?, &ident)?,
                "additional_data" => set_once(&mut args.additional_data, input.parse()?, &ident)?,
                "limit" => {
                    let lit: LitInt = input.parse()?;
                    let limit: u32 = lit.base10_parse()?;
                    if limit == 0 {
                        return Err(syn::Error::new(lit.span(), "limit must be at least 1"));
                    }
                    set_once(&mut args.limit, limit, &ident)?;
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown section attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, ident: &Ident) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(
            ident.span(),
            format!("duplicate section attribute: {}", ident),
        ));
    }
    *slot = Some(value);
    Ok(())
}

/// Implementation of `#[derive(DeclaredSection)]`.
pub fn derive_declared_section_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut attrs = input.attrs.iter().filter(|attr| attr.path().is_ident("section"));
    let Some(attr) = attrs.next() else {
        return syn::Error::new(
            Span::call_site(),
            "missing #[section(key = \"...\")] attribute",
        )
        .to_compile_error()
        .into();
    };
    if let Some(extra) = attrs.next() {
        return syn::Error::new_spanned(extra, "only one #[section(...)] attribute is allowed")
            .to_compile_error()
            .into();
    }

    let args = match attr.parse_args::<SectionArgs>() {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let key = match args.key {
        Some(key) if !key.value().trim().is_empty() => key,
        Some(key) => {
            return syn::Error::new(key.span(), "section key must not be empty")
                .to_compile_error()
                .into();
        }
        None => {
            return syn::Error::new_spanned(attr, "section key is required: key = \"...\"")
                .to_compile_error()
                .into();
        }
    };

    let display_text = args
        .display_text
        .map(|text| quote! { .with_display_text(#text) });
    let limit = args.limit.map(|limit| quote! { .with_limit(#limit) });
    let route = args.route.map(|route| quote! { .with_route(#route) });
    let additional_data = args
        .additional_data
        .map(|data| quote! { .with_additional_data(#data) });

    let expanded = quote! {
        impl #impl_generics ::homescreen::DeclaredSection for #name #ty_generics #where_clause {
            fn declared_meta() -> ::homescreen::SectionMeta {
                ::homescreen::SectionMeta::new(#key)
                    #display_text
                    #limit
                    #route
                    #additional_data
            }
        }
    };

    TokenStream::from(expanded)
}
