use super::ColumnMacros;
use crate::model::FieldType;
use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;

fn field_value(c: &ColumnMacros) -> TokenStream {
    let field = c.field();
    let debug = matches!(c.column.field_type, FieldType::ByteArray | FieldType::Opaque);
    match (c.column.nullable, debug) {
        (false, false) => quote! { write!(f, "{}", self.#field)?; },
        (false, true) => quote! { write!(f, "{:?}", self.#field)?; },
        (true, false) => quote! {
            match &self.#field {
                Some(value) => write!(f, "{}", value)?,
                None => f.write_str("null")?,
            }
        },
        (true, true) => quote! {
            match &self.#field {
                Some(value) => write!(f, "{:?}", value)?,
                None => f.write_str("null")?,
            }
        },
    }
}

/// `Name{pk=1, field=value}` in projection order.
pub fn display_impl(entity_name: &Ident, columns: &[&ColumnMacros]) -> TokenStream {
    let writes: Vec<TokenStream> = columns
        .iter()
        .enumerate()
        .map(|(index, c)| {
            let separator = if index == 0 { "" } else { ", " };
            let label = Literal::string(&format!("{}{}=", separator, c.column.display_name()));
            let value = field_value(c);
            quote! {
                f.write_str(#label)?;
                #value
            }
        })
        .collect();
    let open = Literal::string(&format!("{}{{", entity_name.unraw()));
    quote! {
        impl ::std::fmt::Display for #entity_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(#open)?;
                #(#writes)*
                f.write_str("}")
            }
        }
    }
}
