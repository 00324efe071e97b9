use super::{ColumnMacros, FunctionDef};
use crate::model::AdapterRef;
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::spanned::Spanned;

pub fn read_row_def(columns: &[&ColumnMacros]) -> FunctionDef {
    let fn_name = format_ident!("read_row");
    let reads: Vec<TokenStream> = columns.iter().map(|c| read_statement(c)).collect();
    let fn_stream = quote! {
        fn #fn_name(&mut self, row: &::sqlbit::Row<'_>, registry: &::sqlbit::TypeAdapterRegistry) -> ::core::result::Result<(), ::sqlbit::AppError> {
            #(#reads)*
            Ok(())
        }
    };
    FunctionDef { fn_name, fn_stream }
}

pub fn write_row_def(pk: &ColumnMacros, columns: &[ColumnMacros]) -> FunctionDef {
    let fn_name = format_ident!("write_row");
    let pk_write = write_statement(pk);
    let pk_field = pk.field();
    let writes: Vec<TokenStream> = columns.iter().map(write_statement).collect();
    let fn_stream = quote! {
        fn #fn_name(&self, registry: &::sqlbit::TypeAdapterRegistry) -> ::core::result::Result<::sqlbit::ContentValues, ::sqlbit::AppError> {
            let mut values = ::sqlbit::ContentValues::new();
            if self.#pk_field > 0 {
                #pk_write
            }
            #(#writes)*
            Ok(values)
        }
    };
    FunctionDef { fn_name, fn_stream }
}

/// Statements are spanned on the adapter path, so a bad adapter is reported at the column.
pub(super) fn read_statement(c: &ColumnMacros) -> TokenStream {
    let field = c.field();
    let adapter = &c.adapter;
    let position = Literal::usize_suffixed(c.position);
    if c.column.nullable {
        quote_spanned! {c.adapter_span()=>
            self.#field = ::sqlbit::TypeAdapter::read(&*registry.adapter::<#adapter>()?, #position, row)?;
        }
    } else {
        quote_spanned! {c.adapter_span()=>
            self.#field = ::sqlbit::TypeAdapter::read(&*registry.adapter::<#adapter>()?, #position, row)?.unwrap_or_default();
        }
    }
}

pub(super) fn write_statement(c: &ColumnMacros) -> TokenStream {
    let field = c.field();
    let adapter = &c.adapter;
    let key = Literal::string(&c.column.column_name);
    let value = if c.column.nullable { quote!(self.#field.as_ref()) } else { quote!(Some(&self.#field)) };
    quote_spanned! {c.adapter_span()=>
        ::sqlbit::TypeAdapter::write(&*registry.adapter::<#adapter>()?, #key, #value, &mut values);
    }
}

/// Compile-time check that an explicit adapter converts the field type.
pub fn adapter_assertion(c: &ColumnMacros) -> Option<TokenStream> {
    let AdapterRef::Explicit { path, .. } = &c.column.adapter else {
        return None;
    };
    let value_type = &c.column.ty;
    Some(quote_spanned! {path.span()=>
        {
            fn assert_adapter_value<A: ::sqlbit::TypeAdapter<Value = V>, V>() {}
            assert_adapter_value::<#path, #value_type>();
        }
    })
}
