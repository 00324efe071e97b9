//! Parsing of the `#[entity]` / `#[table]`, `#[column]` and `#[primary_key]` markers.
//!
//! The result is a raw declaration view of the struct: nothing is validated here apart
//! from attribute syntax, so the lint pass can run every rule over it.

use crate::model::{AdapterRef, FieldVisibility, StorageType};
use proc_macro2::{Ident, TokenStream};
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{Attribute, Fields, ItemStruct, Lit, LitStr, Meta, Type};

pub const ENTITY_ATTR: &str = "entity";
pub const TABLE_ATTR: &str = "table";
pub const COLUMN_ATTR: &str = "column";
pub const PRIMARY_KEY_ATTR: &str = "primary_key";

#[derive(Clone, Debug, Default)]
pub struct ColumnAttr {
    pub name: Option<String>,
    pub db_type: Option<StorageType>,
    pub adapter: Option<AdapterRef>,
    pub default_value: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub ident: Ident,
    pub ty: Type,
    pub visibility: FieldVisibility,
    pub column: Option<ColumnAttr>,
    pub primary_key: bool,
}

#[derive(Clone, Debug)]
pub struct EntityDecl {
    pub ident: Ident,
    pub table_name: String,
    pub fields: Vec<FieldDecl>,
}

impl EntityDecl {
    pub fn parse(item: &ItemStruct) -> syn::Result<EntityDecl> {
        let named = match &item.fields {
            Fields::Named(named) => &named.named,
            _ => return Err(syn::Error::new(item.span(), "`#[derive(Entity)]` only supports structs with named fields")),
        };
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new(item.generics.span(), "entities can't have generic parameters"));
        }
        let mut table_name = String::new();
        for attr in &item.attrs {
            if attr.path().is_ident(TABLE_ATTR) {
                table_name = parse_table_attr(attr)?;
            } else if attr.path().is_ident(ENTITY_ATTR) {
                if let Meta::List(list) = &attr.meta {
                    table_name = parse_entity_args(list.tokens.clone())?;
                }
            }
        }
        let mut fields = Vec::with_capacity(named.len());
        for field in named {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new(field.span(), "Unnamed fields not supported"))?;
            let mut column = None;
            let mut primary_key = false;
            for attr in &field.attrs {
                if attr.path().is_ident(COLUMN_ATTR) {
                    column = Some(parse_column_attr(attr)?);
                } else if attr.path().is_ident(PRIMARY_KEY_ATTR) {
                    attr.meta.require_path_only()?;
                    primary_key = true;
                }
            }
            fields.push(FieldDecl {
                ident,
                ty: field.ty.clone(),
                visibility: FieldVisibility::from(&field.vis),
                column,
                primary_key,
            });
        }
        Ok(EntityDecl { ident: item.ident.clone(), table_name, fields })
    }

    /// True when the struct carries an entity marker, used by the lint to pick structs.
    pub fn is_entity(item: &ItemStruct) -> bool {
        item.attrs.iter().any(|attr| {
            attr.path().is_ident(ENTITY_ATTR)
                || attr.path().is_ident(TABLE_ATTR)
                || (attr.path().is_ident("derive") && derives_entity(attr))
        })
    }
}

fn derives_entity(attr: &Attribute) -> bool {
    let mut found = false;
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.segments.last().is_some_and(|seg| seg.ident == "Entity") {
            found = true;
        }
        Ok(())
    });
    found
}

/// Arguments of `#[entity(table = "..")]`.
pub fn parse_entity_args(tokens: TokenStream) -> syn::Result<String> {
    let mut table = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("table") {
            let lit: LitStr = meta.value()?.parse()?;
            table = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("unsupported entity property, expected `table = \"..\"`"))
        }
    });
    parser.parse2(tokens)?;
    Ok(table.unwrap_or_default())
}

fn parse_table_attr(attr: &Attribute) -> syn::Result<String> {
    let mut table = String::new();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            table = lit.value();
            Ok(())
        } else {
            Err(meta.error("unsupported table property, expected `name = \"..\"`"))
        }
    })?;
    Ok(table)
}

fn parse_column_attr(attr: &Attribute) -> syn::Result<ColumnAttr> {
    let mut column = ColumnAttr::default();
    if let Meta::Path(_) = attr.meta {
        return Ok(column);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            column.name = Some(lit.value());
        } else if meta.path.is_ident("db_type") {
            let ident: Ident = meta.value()?.parse()?;
            let db_type = StorageType::from_name(&ident.to_string()).ok_or_else(|| {
                syn::Error::new(ident.span(), format!("unknown database type `{ident}`, expected one of {}", StorageType::NAMES.join(", ")))
            })?;
            column.db_type = Some(db_type);
        } else if meta.path.is_ident("adapter") {
            let path: syn::Path = meta.value()?.parse()?;
            column.adapter = Some(AdapterRef::from_path(path));
        } else if meta.path.is_ident("default") {
            let lit: Lit = meta.value()?.parse()?;
            column.default_value = Some(literal_text(&lit)?);
        } else {
            return Err(meta.error("unsupported column property, expected one of `name`, `db_type`, `adapter`, `default`"));
        }
        Ok(())
    })?;
    Ok(column)
}

fn literal_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(if b.value { "1" } else { "0" }.to_string()),
        other => Err(syn::Error::new(other.span(), "default value must be a string, number or bool literal")),
    }
}
