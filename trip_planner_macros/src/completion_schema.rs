use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{doc_text, field_docs, require_named_fields, SchemaArgs};

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match SchemaArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    if let Err(err) = require_named_fields(&item_struct) {
        return err.to_compile_error().into();
    }

    if !item_struct.generics.params.is_empty() {
        return syn::Error::new(
            item_struct.generics.span(),
            "`#[completion_schema]` cannot be applied to generic structs",
        )
        .to_compile_error()
        .into();
    }

    let ident = &item_struct.ident;
    let type_name = LitStr::new(&ident.to_string(), Span::call_site());
    let schema_name = args.name.unwrap_or_else(|| type_name.clone());

    let description = args
        .description
        .or_else(|| doc_text(&item_struct.attrs).map(|text| LitStr::new(&text, Span::call_site())));
    let description_tokens = match description {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };

    let field_doc_tokens = field_docs(&item_struct).into_iter().map(|(field, doc)| {
        let field = LitStr::new(&field, Span::call_site());
        let doc = LitStr::new(&doc, Span::call_site());
        quote! { (#field, #doc) }
    });

    let expanded = quote! {
        #item_struct

        impl trip_planner_rs::schema::CompletionSchema for #ident {
            fn schema() -> &'static trip_planner_rs::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<trip_planner_rs::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    trip_planner_rs::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                        &[#(#field_doc_tokens),*],
                    );
                    trip_planner_rs::schema::SchemaHandle::from_root_schema::<Self>(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }
        }
    };

    expanded.into()
}
