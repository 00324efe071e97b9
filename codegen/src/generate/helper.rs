use super::{ColumnMacros, FunctionDef};
use quote::{format_ident, quote};

pub fn primary_key_def(pk: &ColumnMacros) -> FunctionDef {
    let fn_name = format_ident!("primary_key");
    let pk_field = pk.field();
    let fn_stream = quote! {
        fn #fn_name(&self) -> i64 {
            self.#pk_field
        }
    };
    FunctionDef { fn_name, fn_stream }
}
