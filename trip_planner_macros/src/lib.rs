//! Procedural macros for `trip-planner-rs`.
//!
//! `#[completion_schema]` turns a response struct into a `CompletionSchema`
//! implementor: the JSON Schema is generated once by `schemars`, decorated with
//! the struct and field doc comments, and cached behind a `OnceLock`.

mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::expand(attr, item)
}
