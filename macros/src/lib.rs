extern crate proc_macro;

use codegen::{artifact, attrs, macro_utils, CompileErrorSink};
use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parse_macro_input, ItemStruct, Path};

/// `#[entity(table = "contacts")]` derives `Entity` together with the traits generated code relies on.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut s = parse_macro_input!(item as ItemStruct);
    let struct_ident = s.ident.clone();
    let table_name = match attrs::parse_entity_args(attr.into()) {
        Ok(table_name) => table_name,
        Err(e) => return e.to_compile_error().into(),
    };
    let derives: Punctuated<Path, Comma> = syn::parse_quote![Clone, Debug, Default, PartialEq, ::sqlbit::Entity];
    if let Err(e) = macro_utils::merge_struct_derives(&mut s, derives) {
        return e.to_compile_error().into();
    }
    // helper attribute, must come after the derive
    s.attrs.push(syn::parse_quote! { #[table(name = #table_name)] });
    let stream = quote! {
        #s
    };
    artifact::submit(stream, "entity", &struct_ident).into()
}

#[proc_macro_derive(Entity, attributes(table, column, primary_key))]
#[proc_macro_error]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item_struct = parse_macro_input!(input as ItemStruct);
    let mut sink = CompileErrorSink::default();
    match codegen::expand_entity(&item_struct, &mut sink) {
        Some(stream) if !sink.has_errors() => artifact::submit(stream, "helper", &item_struct.ident).into(),
        _ => sink.into_compile_errors().into(),
    }
}

/// `database!(pub AppDatabase { ContactEntity, MessageEntity })` generates the schema installer.
#[proc_macro]
#[proc_macro_error]
pub fn database(input: TokenStream) -> TokenStream {
    let input: proc_macro2::TokenStream = input.into();
    let database = match syn::parse2::<codegen::DatabaseMacros>(input) {
        Ok(database) => database,
        Err(e) => return e.to_compile_error().into(),
    };
    artifact::submit(database.expand(), "database", &database.name).into()
}
