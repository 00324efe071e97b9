//! Validation rules over entity declarations.
//!
//! Each check is a free function producing at most a handful of [`Diagnostic`]s. The
//! extractor stops at the first error, `sqlbit-lint` runs every check through [`check_entity`].

use crate::attrs::{EntityDecl, FieldDecl};
use crate::diagnostics::{Diagnostic, Location};
use crate::extract;
use crate::mapping;
use crate::model::{AdapterRef, ColumnDescriptor, EntityDescriptor, FieldVisibility, StorageType};
use quote::ToTokens;
use std::collections::HashMap;
use std::fmt;
use syn::{GenericArgument, PathArguments, Type};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    UnknownColumnDbType,
    UnknownType,
    WrongAdapterType,
    PrimaryKeyType,
    PrimaryKeyNotDefined,
    PrimaryKeyAlreadyDefined,
    PrimaryKeyIsNotColumn,
    PrivateColumn,
    InvalidEntity,
}

impl Rule {
    pub const ALL: [Rule; 9] = [
        Rule::UnknownColumnDbType,
        Rule::UnknownType,
        Rule::WrongAdapterType,
        Rule::PrimaryKeyType,
        Rule::PrimaryKeyNotDefined,
        Rule::PrimaryKeyAlreadyDefined,
        Rule::PrimaryKeyIsNotColumn,
        Rule::PrivateColumn,
        Rule::InvalidEntity,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Rule::UnknownColumnDbType => "UnknownColumnDbType",
            Rule::UnknownType => "UnknownType",
            Rule::WrongAdapterType => "WrongAdapterType",
            Rule::PrimaryKeyType => "PrimaryKeyType",
            Rule::PrimaryKeyNotDefined => "PrimaryKeyNotDefined",
            Rule::PrimaryKeyAlreadyDefined => "PrimaryKeyAlreadyDefined",
            Rule::PrimaryKeyIsNotColumn => "PrimaryKeyIsNotColumn",
            Rule::PrivateColumn => "PrivateColumn",
            Rule::InvalidEntity => "InvalidEntity",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Rule::UnknownColumnDbType => "Database type of the column must be explicitly specified",
            Rule::UnknownType => "Type adapter must be explicitly provided",
            Rule::WrongAdapterType => "Type adapter must be of the same type as column",
            Rule::PrimaryKeyType => "Primary key must be i64",
            Rule::PrimaryKeyNotDefined => "Primary key in the entity is not defined",
            Rule::PrimaryKeyAlreadyDefined => "Primary key in the entity is already defined",
            Rule::PrimaryKeyIsNotColumn => "Primary key must be a column of the entity",
            Rule::PrivateColumn => "Column field is not accessible",
            Rule::InvalidEntity => "Entity needs a table name and a primary key",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Rule::UnknownColumnDbType => {
                "Database type of the column can not be detected from the field type and must be set with `db_type`"
            }
            Rule::UnknownType => {
                "A type adapter converting the field to and from its column value must be set with `adapter`"
            }
            Rule::WrongAdapterType => {
                "The adapter `Value` type must be the field type, otherwise column data can't be converted"
            }
            Rule::PrimaryKeyType => {
                "The primary key of an entity is a SQLite rowid and must be declared as `i64` with `INT` storage"
            }
            Rule::PrimaryKeyNotDefined => "An entity requires one `i64` column marked with `#[primary_key]`",
            Rule::PrimaryKeyAlreadyDefined => {
                "An entity requires exactly one primary key, at least two fields are marked with `#[primary_key]`"
            }
            Rule::PrimaryKeyIsNotColumn => "The field is marked with `#[primary_key]` but not with `#[column]`",
            Rule::PrivateColumn => "Private fields are not persisted, make the field `pub` or `pub(crate)`",
            Rule::InvalidEntity => "Entities are declared with `#[entity(table = \"..\")]` and one primary key column",
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|rule| rule.id() == id)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Conversion input types of adapters found in the analysed sources, keyed by adapter name.
#[derive(Clone, Debug, Default)]
pub struct AdapterIndex {
    values: HashMap<String, Type>,
}

impl AdapterIndex {
    pub fn insert(&mut self, adapter: impl Into<String>, value_type: Type) {
        self.values.insert(adapter.into(), value_type);
    }

    pub fn value_type(&self, adapter: &str) -> Option<&Type> {
        self.values.get(adapter)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fills in the adapter value type of a column when the adapter is indexed.
    pub fn annotate(&self, column: &mut ColumnDescriptor) {
        if let AdapterRef::Explicit { path, value_type } = &mut column.adapter {
            if value_type.is_none() {
                let name = path.segments.last().map(|seg| seg.ident.to_string()).unwrap_or_default();
                *value_type = self.values.get(&name).cloned();
            }
        }
    }
}

/// Type identity for comparison: paths are reduced to their last segment, whitespace is dropped.
pub fn canonical_type(ty: &Type) -> String {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => match tp.path.segments.last() {
            Some(seg) => {
                let mut out = seg.ident.to_string();
                if let PathArguments::AngleBracketed(args) = &seg.arguments {
                    let inner: Vec<String> = args
                        .args
                        .iter()
                        .map(|arg| match arg {
                            GenericArgument::Type(ty) => canonical_type(ty),
                            other => other.to_token_stream().to_string().replace(' ', ""),
                        })
                        .collect();
                    out.push('<');
                    out.push_str(&inner.join(","));
                    out.push('>');
                }
                out
            }
            None => String::new(),
        },
        Type::Paren(paren) => canonical_type(&paren.elem),
        Type::Group(group) => canonical_type(&group.elem),
        other => other.to_token_stream().to_string().replace(' ', ""),
    }
}

fn field_location(decl: &EntityDecl, field: &FieldDecl) -> Location {
    Location::new(field.ident.span(), format!("{}.{}", decl.ident, syn::ext::IdentExt::unraw(&field.ident)))
}

fn entity_location(decl: &EntityDecl) -> Location {
    Location::new(decl.ident.span(), decl.ident.to_string())
}

pub fn check_storage_type(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Option<Diagnostic> {
    mapping::resolve_storage_type(entity, column).err().map(|e| e.into_diagnostic())
}

pub fn check_adapter(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Option<Diagnostic> {
    mapping::resolve_adapter(entity, column).err().map(|e| e.into_diagnostic())
}

/// Only decidable when the adapter value type is known, see [`AdapterIndex::annotate`].
pub fn check_adapter_value_type(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Option<Diagnostic> {
    let AdapterRef::Explicit { path, value_type: Some(value_type) } = &column.adapter else {
        return None;
    };
    let expected = canonical_type(&column.ty);
    let actual = canonical_type(value_type);
    if expected == actual {
        return None;
    }
    let adapter = path.segments.last().map(|seg| seg.ident.to_string()).unwrap_or_default();
    let message = format!(
        "adapter `{adapter}` converts `{actual}` but `{}` is of type `{expected}`",
        column.display_name()
    );
    Some(Diagnostic::error(Location::field(entity, column), message).with_rule(Rule::WrongAdapterType))
}

pub fn is_primary_key_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if tp.qself.is_none() && tp.path.is_ident("i64"))
}

pub fn check_primary_key_type(decl: &EntityDecl, field: &FieldDecl) -> Option<Diagnostic> {
    if !field.primary_key || is_primary_key_type(&field.ty) {
        return None;
    }
    let message = format!("primary key `{}` must be of type i64", syn::ext::IdentExt::unraw(&field.ident));
    Some(Diagnostic::error(field_location(decl, field), message).with_rule(Rule::PrimaryKeyType))
}

/// `AUTOINCREMENT` is only accepted on an `INTEGER PRIMARY KEY`.
pub fn check_primary_key_storage(entity: &EntityDescriptor, column: &ColumnDescriptor) -> Option<Diagnostic> {
    match mapping::resolve_storage_type(entity, column) {
        Ok(storage_type) if column.is_primary_key && storage_type != StorageType::Int => {
            let message = format!("primary key `{}` must be stored as INT, not {storage_type}", column.display_name());
            Some(Diagnostic::error(Location::field(entity, column), message).with_rule(Rule::PrimaryKeyType))
        }
        _ => None,
    }
}

pub fn check_primary_key_is_column(decl: &EntityDecl, field: &FieldDecl) -> Option<Diagnostic> {
    if !field.primary_key || field.column.is_some() {
        return None;
    }
    let message = format!("primary key `{}` must be a column", syn::ext::IdentExt::unraw(&field.ident));
    Some(Diagnostic::error(field_location(decl, field), message).with_rule(Rule::PrimaryKeyIsNotColumn))
}

pub fn check_private_column(decl: &EntityDecl, field: &FieldDecl) -> Option<Diagnostic> {
    if field.column.is_none() || field.visibility != FieldVisibility::Private {
        return None;
    }
    let message = format!("`{}` is private, column skipped", syn::ext::IdentExt::unraw(&field.ident));
    Some(Diagnostic::warning(field_location(decl, field), message).with_rule(Rule::PrivateColumn))
}

pub fn duplicate_primary_key(decl: &EntityDecl, field: &FieldDecl) -> Diagnostic {
    let message = format!("entity `{}` must have exactly one primary key", decl.ident);
    Diagnostic::error(field_location(decl, field), message).with_rule(Rule::PrimaryKeyAlreadyDefined)
}

/// Missing key, or more than one: duplicates are reported on every key field but the last.
pub fn check_primary_key_count(decl: &EntityDecl) -> Vec<Diagnostic> {
    let keys: Vec<&FieldDecl> = decl.fields.iter().filter(|f| f.primary_key).collect();
    if keys.is_empty() {
        let message = format!("entity `{}` has no primary key", decl.ident);
        return vec![Diagnostic::error(entity_location(decl), message).with_rule(Rule::PrimaryKeyNotDefined)];
    }
    let duplicates = keys.len() - 1;
    keys.into_iter().take(duplicates).map(|field| duplicate_primary_key(decl, field)).collect()
}

pub fn check_entity_valid(entity: &EntityDescriptor) -> Option<Diagnostic> {
    if entity.is_valid() {
        return None;
    }
    let message = format!("invalid entity `{}`: missing primary key or table name", entity.name());
    Some(Diagnostic::error(Location::entity(entity), message).with_rule(Rule::InvalidEntity))
}

/// Every rule over one declaration, in field order. Used by the lint pass.
pub fn check_entity(decl: &EntityDecl, adapters: &AdapterIndex) -> Vec<Diagnostic> {
    let entity = EntityDescriptor::new(decl.ident.clone(), decl.table_name.clone());
    let mut diagnostics = check_primary_key_count(decl);
    if decl.table_name.is_empty() {
        let message = format!("entity `{}` has no table name", decl.ident);
        diagnostics.push(Diagnostic::error(entity_location(decl), message).with_rule(Rule::InvalidEntity));
    }
    for field in &decl.fields {
        let key_type = check_primary_key_type(decl, field);
        let key_type_ok = key_type.is_none();
        diagnostics.extend(key_type);
        diagnostics.extend(check_primary_key_is_column(decl, field));
        diagnostics.extend(check_private_column(decl, field));
        let Some(mut column) = extract::column_descriptor(field) else {
            continue;
        };
        adapters.annotate(&mut column);
        if key_type_ok {
            diagnostics.extend(check_primary_key_storage(&entity, &column));
        }
        diagnostics.extend(check_storage_type(&entity, &column));
        diagnostics.extend(check_adapter(&entity, &column));
        diagnostics.extend(check_adapter_value_type(&entity, &column));
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use syn::{parse_quote, ItemStruct};

    fn decl(item: ItemStruct) -> EntityDecl {
        EntityDecl::parse(&item).unwrap()
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<Rule> {
        diagnostics.iter().filter_map(|d| d.rule).collect()
    }

    #[test]
    fn rule_ids_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_id(rule.id()), Some(rule));
            assert!(!rule.title().is_empty());
            assert!(!rule.body().is_empty());
        }
        assert_eq!(Rule::from_id("Nope"), None);
    }

    #[test]
    fn adapter_declared_for_string_with_i32_value_is_a_mismatch() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[column] #[primary_key] pub id: i64,
                #[column(adapter = IntAdapter)] pub name: String,
            }
        });
        let mut index = AdapterIndex::default();
        index.insert("IntAdapter", parse_quote!(i32));
        let diagnostics = check_entity(&decl, &index);
        assert_eq!(rules(&diagnostics), vec![Rule::WrongAdapterType]);
        assert_eq!(diagnostics[0].message, "adapter `IntAdapter` converts `i32` but `name` is of type `String`");
        assert_eq!(diagnostics[0].location.element, "Contact.name");
    }

    #[test]
    fn matching_adapter_value_passes_regardless_of_path_prefix() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[column] #[primary_key] pub id: i64,
                #[column(adapter = crate::UriAdapter, db_type = TEXT)] pub photo: Option<crate::Uri>,
            }
        });
        let mut index = AdapterIndex::default();
        index.insert("UriAdapter", parse_quote!(Uri));
        assert!(check_entity(&decl, &index).is_empty());
    }

    #[test]
    fn unknown_adapter_value_type_is_not_reported() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[column] #[primary_key] pub id: i64,
                #[column(adapter = ExternalAdapter, db_type = TEXT)] pub photo: Uri,
            }
        });
        assert!(check_entity(&decl, &AdapterIndex::default()).is_empty());
    }

    #[test]
    fn unknown_types_need_db_type_and_adapter() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[column] #[primary_key] pub id: i64,
                #[column] pub photo: Uri,
            }
        });
        let diagnostics = check_entity(&decl, &AdapterIndex::default());
        assert_eq!(rules(&diagnostics), vec![Rule::UnknownColumnDbType, Rule::UnknownType]);
    }

    #[test]
    fn duplicate_keys_are_reported_on_all_but_the_last() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[column] #[primary_key] pub a: i64,
                #[column] #[primary_key] pub b: i64,
                #[column] #[primary_key] pub c: i64,
            }
        });
        let diagnostics = check_primary_key_count(&decl);
        let elements: Vec<&str> = diagnostics.iter().map(|d| d.location.element.as_str()).collect();
        assert_eq!(elements, ["Contact.a", "Contact.b"]);
        assert!(diagnostics.iter().all(|d| d.rule == Some(Rule::PrimaryKeyAlreadyDefined)));
    }

    #[test]
    fn key_rules() {
        let decl = decl(parse_quote! {
            #[table(name = "contacts")]
            struct Contact {
                #[primary_key] pub id: i32,
                #[column] secret: String,
            }
        });
        let diagnostics = check_entity(&decl, &AdapterIndex::default());
        assert_eq!(rules(&diagnostics), vec![Rule::PrimaryKeyType, Rule::PrimaryKeyIsNotColumn, Rule::PrivateColumn]);
        assert_eq!(diagnostics[2].severity, Severity::Warning);
        assert_eq!(diagnostics[2].message, "`secret` is private, column skipped");

        let keyless = self::decl(parse_quote! {
            struct Keyless { #[column] pub name: String }
        });
        assert_eq!(rules(&check_primary_key_count(&keyless)), vec![Rule::PrimaryKeyNotDefined]);
        assert_eq!(
            rules(&check_entity(&keyless, &AdapterIndex::default())),
            vec![Rule::PrimaryKeyNotDefined, Rule::InvalidEntity]
        );
    }

    #[test]
    fn text_storage_on_primary_key_is_rejected() {
        let decl = decl(parse_quote! {
            #[table(name = "textkey")]
            struct TextKey {
                #[column(db_type = TEXT)] #[primary_key] pub id: i64,
                #[column(db_type = TEXT)] pub name: String,
            }
        });
        let diagnostics = check_entity(&decl, &AdapterIndex::default());
        assert_eq!(rules(&diagnostics), vec![Rule::PrimaryKeyType]);
        assert_eq!(diagnostics[0].message, "primary key `id` must be stored as INT, not TEXT");
        assert_eq!(diagnostics[0].location.element, "TextKey.id");

        let explicit_int = self::decl(parse_quote! {
            #[table(name = "intkey")]
            struct IntKey { #[column(db_type = INT)] #[primary_key] pub id: i64 }
        });
        assert!(check_entity(&explicit_int, &AdapterIndex::default()).is_empty());
    }

    #[test]
    fn canonical_types_ignore_module_paths() {
        assert_eq!(canonical_type(&parse_quote!(std::vec::Vec<u8>)), "Vec<u8>");
        assert_eq!(canonical_type(&parse_quote!(chrono::DateTime<chrono::Utc>)), "DateTime<Utc>");
        assert_ne!(canonical_type(&parse_quote!(i32)), canonical_type(&parse_quote!(i64)));
    }
}
