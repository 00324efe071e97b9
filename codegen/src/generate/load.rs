use super::{ColumnMacros, FunctionDef};
use proc_macro2::Literal;
use quote::{format_ident, quote};

pub fn fn_def(table_name: &str, pk: &ColumnMacros) -> FunctionDef {
    let fn_name = format_ident!("load");
    let table = Literal::string(table_name);
    let pk_field = pk.field();
    let pk_column = Literal::string(&pk.column.column_name);
    let fn_stream = quote! {
        fn #fn_name<P: ::sqlbit::DatabaseProvider>(&mut self, provider: &P) -> ::core::result::Result<(), ::sqlbit::AppError> {
            if self.#pk_field <= 0 {
                return Err(::sqlbit::AppError::MissingPrimaryKey);
            }
            let key = self.#pk_field;
            let registry = provider.adapters();
            let conn = provider.readable_handle()?;
            ::sqlbit::sql::query_by_key(&conn, #table, <Self as ::sqlbit::EntityHelper>::PROJECTION, #pk_column, key, |row| {
                self.read_row(row, registry)
            })?;
            Ok(())
        }
    };
    FunctionDef { fn_name, fn_stream }
}
