use super::EntityMacros;
use proc_macro2::{Literal, TokenStream};
use quote::quote;

impl EntityMacros {
    pub fn expand(&self) -> TokenStream {
        let entity_name = &self.entity_name;
        let table = Literal::string(&self.table_name);
        let create_statement = Literal::string(&self.create_statement);
        let projection: Vec<Literal> = self.projection.iter().map(|c| Literal::string(c)).collect();
        let row_functions: Vec<TokenStream> = self.row_functions.iter().map(|f| f.fn_stream.clone()).collect();
        let helper_functions: Vec<TokenStream> = self.helper_functions.iter().map(|f| f.fn_stream.clone()).collect();
        let display_impl = &self.display_impl;
        let adapter_assertions = &self.adapter_assertions;

        quote! {
            impl #entity_name {
                pub const CREATE_STATEMENT: &'static str = #create_statement;
                pub const PROJECTION: &'static [&'static str] = &[#(#projection),*];

                #(#row_functions)*
            }

            impl ::sqlbit::EntityHelper for #entity_name {
                const TABLE_NAME: &'static str = #table;
                const CREATE_STATEMENT: &'static str = #create_statement;
                const PROJECTION: &'static [&'static str] = &[#(#projection),*];

                #(#helper_functions)*
            }

            #display_impl

            // explicit adapters must convert the field type
            const _: fn() = || {
                #(#adapter_assertions)*
            };
        }
    }
}
