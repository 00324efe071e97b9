//! Immutable per-entity schema description consumed by the generator and the lint pass.
//!
//! An [`EntityDescriptor`] is built once per entity, either by the extractor from struct
//! attributes or programmatically through the builder methods below.

use proc_macro2::{Ident, Span};
use quote::ToTokens;
use std::fmt;
use syn::ext::IdentExt;
use syn::{Path, Type};

/// Semantic type of a persisted field, `Option<T>` is classified as `T` and flagged nullable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
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
    Opaque,
}

impl FieldType {
    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Opaque)
    }
}

/// On-disk representation category of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageType {
    Text,
    Int,
    Float,
    Blob,
}

impl StorageType {
    pub const NAMES: [&'static str; 4] = ["TEXT", "INT", "FLOAT", "BLOB"];

    pub fn from_name(name: &str) -> Option<StorageType> {
        match name {
            "TEXT" => Some(StorageType::Text),
            "INT" => Some(StorageType::Int),
            "FLOAT" => Some(StorageType::Float),
            "BLOB" => Some(StorageType::Blob),
            _ => None,
        }
    }

    /// SQLite type name used in DDL. `AUTOINCREMENT` is only accepted on `INTEGER PRIMARY KEY`.
    pub fn sql_type(&self) -> &'static str {
        match self {
            StorageType::Text => "TEXT",
            StorageType::Int => "INTEGER",
            StorageType::Float => "REAL",
            StorageType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageType::Text => "TEXT",
            StorageType::Int => "INT",
            StorageType::Float => "FLOAT",
            StorageType::Blob => "BLOB",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldVisibility {
    Public,
    Restricted,
    Private,
}

impl From<&syn::Visibility> for FieldVisibility {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => FieldVisibility::Public,
            syn::Visibility::Restricted(_) => FieldVisibility::Restricted,
            syn::Visibility::Inherited => FieldVisibility::Private,
        }
    }
}

/// Adapter reference as declared on a column.
#[derive(Clone, Debug)]
pub enum AdapterRef {
    /// No adapter given, or the `DefaultAdapter` sentinel: resolved through the type mapping.
    Default,
    Explicit {
        path: Path,
        /// Conversion input type of the adapter when it is known (lint pass).
        value_type: Option<Type>,
    },
}

impl AdapterRef {
    pub const SENTINEL: &'static str = "DefaultAdapter";

    pub fn from_path(path: Path) -> AdapterRef {
        let is_sentinel = path.segments.last().is_some_and(|seg| seg.ident == Self::SENTINEL);
        if is_sentinel {
            AdapterRef::Default
        } else {
            AdapterRef::Explicit { path, value_type: None }
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, AdapterRef::Explicit { .. })
    }

    /// Last path segment, the adapter identity used by the lint adapter index.
    pub fn name(&self) -> Option<String> {
        match self {
            AdapterRef::Default => None,
            AdapterRef::Explicit { path, .. } => path.segments.last().map(|seg| seg.ident.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    pub field_name: Ident,
    /// Field type with any `Option` wrapper removed.
    pub ty: Type,
    pub field_type: FieldType,
    pub nullable: bool,
    pub column_name: String,
    pub storage_type: Option<StorageType>,
    pub adapter: AdapterRef,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    pub span: Span,
}

impl ColumnDescriptor {
    pub fn new(field_name: Ident, field_ty: &Type) -> ColumnDescriptor {
        let (ty, nullable) = crate::mapping::unwrap_option(field_ty);
        let field_type = crate::mapping::classify(&ty);
        let column_name = field_name.unraw().to_string().to_uppercase();
        let span = field_name.span();
        ColumnDescriptor {
            field_name,
            ty,
            field_type,
            nullable,
            column_name,
            storage_type: None,
            adapter: AdapterRef::Default,
            default_value: None,
            is_primary_key: false,
            span,
        }
    }

    pub fn with_column_name(mut self, name: impl Into<String>) -> Self {
        self.column_name = name.into();
        self
    }

    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = Some(storage_type);
        self
    }

    pub fn with_adapter(mut self, adapter: AdapterRef) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Field name as written in source, without a raw identifier prefix.
    pub fn display_name(&self) -> String {
        self.field_name.unraw().to_string()
    }

    /// Field type as written in source, `Option` wrapper included.
    pub fn type_label(&self) -> String {
        let inner = self.ty.to_token_stream().to_string().replace(' ', "");
        if self.nullable {
            format!("Option<{inner}>")
        } else {
            inner
        }
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    pub ident: Ident,
    pub table_name: String,
    primary_key: Option<ColumnDescriptor>,
    columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    pub fn new(ident: Ident, table_name: impl Into<String>) -> EntityDescriptor {
        EntityDescriptor { ident, table_name: table_name.into(), primary_key: None, columns: Vec::new() }
    }

    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.primary_key.as_ref()
    }

    pub fn set_primary_key(&mut self, column: ColumnDescriptor) {
        self.primary_key = Some(column.primary_key());
    }

    pub fn add_column(&mut self, column: ColumnDescriptor) {
        self.columns.push(column);
    }

    pub fn with_primary_key(mut self, column: ColumnDescriptor) -> Self {
        self.set_primary_key(column);
        self
    }

    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        self.add_column(column);
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Primary key first, then the declared columns in declaration order.
    pub fn all_columns(&self) -> Vec<&ColumnDescriptor> {
        self.primary_key.iter().chain(self.columns.iter()).collect()
    }

    pub fn is_valid(&self) -> bool {
        !self.table_name.is_empty() && self.primary_key.is_some()
    }

    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}
