use super::{ColumnMacros, FunctionDef};
use proc_macro2::Literal;
use quote::{format_ident, quote};

pub fn fn_def(table_name: &str, pk: &ColumnMacros) -> FunctionDef {
    let fn_name = format_ident!("delete");
    let table = Literal::string(table_name);
    let pk_field = pk.field();
    let pk_column = Literal::string(&pk.column.column_name);
    let fn_stream = quote! {
        fn #fn_name<P: ::sqlbit::DatabaseProvider>(&mut self, provider: &P) -> ::core::result::Result<usize, ::sqlbit::AppError> {
            if self.#pk_field <= 0 {
                return Err(::sqlbit::AppError::MissingPrimaryKey);
            }
            let conn = provider.writable_handle()?;
            let deleted = ::sqlbit::sql::delete_by_key(&conn, #table, #pk_column, self.#pk_field)?;
            if deleted > 0 {
                self.#pk_field = 0;
            }
            Ok(deleted)
        }
    };
    FunctionDef { fn_name, fn_stream }
}
