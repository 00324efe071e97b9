//! Static mapping from native field types to a default adapter and a default storage type.

use crate::diagnostics::{AbortError, Diagnostic, Location};
use crate::model::{AdapterRef, ColumnDescriptor, EntityDescriptor, FieldType, StorageType};
use crate::rules::Rule;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{GenericArgument, Path, PathArguments, Type};

/// Built-in adapters shipped by the `sqlbit` runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinAdapter {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    ByteArray,
    Date,
}

impl BuiltinAdapter {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinAdapter::Bool => "BoolAdapter",
            BuiltinAdapter::Byte => "ByteAdapter",
            BuiltinAdapter::Short => "ShortAdapter",
            BuiltinAdapter::Int => "IntAdapter",
            BuiltinAdapter::Long => "LongAdapter",
            BuiltinAdapter::Float => "FloatAdapter",
            BuiltinAdapter::Double => "DoubleAdapter",
            BuiltinAdapter::String => "StringAdapter",
            BuiltinAdapter::ByteArray => "ByteArrayAdapter",
            BuiltinAdapter::Date => "DateAdapter",
        }
    }
}

/// Adapter a column resolved to, either a runtime built-in or a user type.
#[derive(Clone, Debug)]
pub enum ResolvedAdapter {
    Builtin(BuiltinAdapter),
    Custom(Path),
}

impl ResolvedAdapter {
    pub fn name(&self) -> String {
        match self {
            ResolvedAdapter::Builtin(builtin) => builtin.name().to_string(),
            ResolvedAdapter::Custom(path) => path.to_token_stream().to_string().replace(' ', ""),
        }
    }
}

impl ToTokens for ResolvedAdapter {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            ResolvedAdapter::Builtin(builtin) => {
                let ident = syn::Ident::new(builtin.name(), proc_macro2::Span::call_site());
                tokens.extend(quote!(::sqlbit::#ident));
            }
            ResolvedAdapter::Custom(path) => path.to_tokens(tokens),
        }
    }
}

fn last_ident_is(ty: &Type, name: &str) -> bool {
    matches!(ty, Type::Path(tp) if tp.qself.is_none() && tp.path.segments.last().is_some_and(|seg| seg.ident == name && seg.arguments.is_empty()))
}

fn single_generic_arg(ty: &Type, name: &str) -> Option<Type> {
    let Type::Path(tp) = ty else { return None };
    let seg = tp.path.segments.last()?;
    if seg.ident != name {
        return None;
    }
    match &seg.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner.clone()),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_string(ty: &Type) -> bool {
    last_ident_is(ty, "String")
}

pub fn is_vec_u8(ty: &Type) -> bool {
    single_generic_arg(ty, "Vec").is_some_and(|inner| matches!(inner, Type::Path(p) if p.path.is_ident("u8")))
}

pub fn is_datetime_utc(ty: &Type) -> bool {
    single_generic_arg(ty, "DateTime").is_some_and(|inner| last_ident_is(&inner, "Utc"))
}

/// Strips one `Option<..>` layer, returning the inner type and whether it was present.
pub fn unwrap_option(ty: &Type) -> (Type, bool) {
    match single_generic_arg(ty, "Option") {
        Some(inner) => (inner, true),
        None => (ty.clone(), false),
    }
}

pub fn classify(ty: &Type) -> FieldType {
    if let Type::Path(tp) = ty {
        if let Some(ident) = tp.path.get_ident() {
            match ident.to_string().as_str() {
                "bool" => return FieldType::Bool,
                "i8" => return FieldType::Byte,
                "i16" => return FieldType::Short,
                "i32" => return FieldType::Int,
                "i64" => return FieldType::Long,
                "f32" => return FieldType::Float,
                "f64" => return FieldType::Double,
                _ => {}
            }
        }
    }
    if is_string(ty) {
        FieldType::String
    } else if is_vec_u8(ty) {
        FieldType::ByteArray
    } else if is_datetime_utc(ty) {
        FieldType::Date
    } else {
        FieldType::Opaque
    }
}

pub fn default_storage_type(field_type: FieldType) -> Option<StorageType> {
    match field_type {
        FieldType::Bool | FieldType::Byte | FieldType::Short | FieldType::Int | FieldType::Long => Some(StorageType::Int),
        FieldType::Float | FieldType::Double => Some(StorageType::Float),
        FieldType::String => Some(StorageType::Text),
        FieldType::ByteArray => Some(StorageType::Blob),
        FieldType::Date => Some(StorageType::Int),
        FieldType::Opaque => None,
    }
}

pub fn default_adapter(field_type: FieldType) -> Option<BuiltinAdapter> {
    match field_type {
        FieldType::Bool => Some(BuiltinAdapter::Bool),
        FieldType::Byte => Some(BuiltinAdapter::Byte),
        FieldType::Short => Some(BuiltinAdapter::Short),
        FieldType::Int => Some(BuiltinAdapter::Int),
        FieldType::Long => Some(BuiltinAdapter::Long),
        FieldType::Float => Some(BuiltinAdapter::Float),
        FieldType::Double => Some(BuiltinAdapter::Double),
        FieldType::String => Some(BuiltinAdapter::String),
        FieldType::ByteArray => Some(BuiltinAdapter::ByteArray),
        FieldType::Date => Some(BuiltinAdapter::Date),
        FieldType::Opaque => None,
    }
}

pub fn resolve_storage_type(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Result<StorageType, AbortError> {
    if let Some(storage_type) = column.storage_type {
        return Ok(storage_type);
    }
    default_storage_type(column.field_type).ok_or_else(|| {
        let message = format!(
            "unknown database type for column `{}` of type `{}`",
            column.display_name(),
            column.type_label()
        );
        Diagnostic::error(Location::field(entity, column), message).with_rule(Rule::UnknownColumnDbType).into()
    })
}

pub fn resolve_adapter(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Result<ResolvedAdapter, AbortError> {
    if let AdapterRef::Explicit { path, .. } = &column.adapter {
        return Ok(ResolvedAdapter::Custom(path.clone()));
    }
    default_adapter(column.field_type).map(ResolvedAdapter::Builtin).ok_or_else(|| {
        let message = format!(
            "`{}` has unsupported type `{}` for saving to database",
            column.display_name(),
            column.type_label()
        );
        Diagnostic::error(Location::field(entity, column), message).with_rule(Rule::UnknownType).into()
    })
}
