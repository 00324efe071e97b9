use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{braced, Path, Visibility};

/// `database!(pub AppDatabase { ContactEntity, MessageEntity })`
pub struct DatabaseMacros {
    pub vis: Visibility,
    pub name: Ident,
    pub entities: Vec<Path>,
}

impl Parse for DatabaseMacros {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let vis: Visibility = input.parse()?;
        let name: Ident = input.parse()?;
        let content;
        braced!(content in input);
        let entities: Punctuated<Path, Comma> = content.parse_terminated(Path::parse, Comma)?;
        if entities.is_empty() {
            return Err(syn::Error::new(name.span(), "database must list at least one entity"));
        }
        Ok(DatabaseMacros { vis, name, entities: entities.into_iter().collect() })
    }
}

impl DatabaseMacros {
    pub fn expand(&self) -> TokenStream {
        let vis = &self.vis;
        let name = &self.name;
        let entities = &self.entities;
        quote! {
            #[derive(Clone, Copy, Debug, Default)]
            #vis struct #name;

            impl #name {
                pub const TABLES: &'static [&'static str] = &[#(<#entities as ::sqlbit::EntityHelper>::TABLE_NAME),*];
            }

            impl ::sqlbit::SchemaInstaller for #name {
                fn create_schema(&self, db: &::sqlbit::rusqlite::Connection) -> ::core::result::Result<(), ::sqlbit::AppError> {
                    #(db.execute_batch(<#entities as ::sqlbit::EntityHelper>::CREATE_STATEMENT)?;)*
                    Ok(())
                }

                fn upgrade_schema(&self, _db: &::sqlbit::rusqlite::Connection, _old_version: u32, _new_version: u32) -> ::core::result::Result<(), ::sqlbit::AppError> {
                    Ok(())
                }
            }
        }
    }
}
