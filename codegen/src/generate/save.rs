use super::{ColumnMacros, FunctionDef};
use proc_macro2::Literal;
use quote::{format_ident, quote};

pub fn fn_def(table_name: &str, pk: &ColumnMacros) -> FunctionDef {
    let fn_name = format_ident!("save");
    let table = Literal::string(table_name);
    let pk_field = pk.field();
    let pk_column = Literal::string(&pk.column.column_name);
    let fn_stream = quote! {
        fn #fn_name<P: ::sqlbit::DatabaseProvider>(&mut self, provider: &P) -> ::core::result::Result<(), ::sqlbit::AppError> {
            let values = self.write_row(provider.adapters())?;
            let conn = provider.writable_handle()?;
            if self.#pk_field > 0 {
                ::sqlbit::sql::update_by_key(&conn, #table, &values, #pk_column, self.#pk_field)?;
            } else {
                self.#pk_field = ::sqlbit::sql::insert(&conn, #table, &values)?;
            }
            Ok(())
        }
    };
    FunctionDef { fn_name, fn_stream }
}
