use super::FunctionDef;
use proc_macro2::Literal;
use quote::{format_ident, quote};

pub fn fn_def(table_name: &str) -> FunctionDef {
    let fn_name = format_ident!("query_all");
    let table = Literal::string(table_name);
    let fn_stream = quote! {
        fn #fn_name<P: ::sqlbit::DatabaseProvider>(provider: &P) -> ::core::result::Result<Vec<Self>, ::sqlbit::AppError> {
            let registry = provider.adapters();
            let conn = provider.readable_handle()?;
            ::sqlbit::sql::query_all(&conn, #table, <Self as ::sqlbit::EntityHelper>::PROJECTION, |row| {
                let mut entity = Self::default();
                entity.read_row(row, registry)?;
                Ok(entity)
            })
        }
    };
    FunctionDef { fn_name, fn_stream }
}
