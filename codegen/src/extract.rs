use crate::attrs::{EntityDecl, FieldDecl};
use crate::diagnostics::{AbortError, DiagnosticSink};
use crate::model::{ColumnDescriptor, EntityDescriptor};
use crate::rules;
use syn::ItemStruct;

/// Column view of a field carrying `#[column]`, `None` for transient fields.
pub fn column_descriptor(field: &FieldDecl) -> Option<ColumnDescriptor> {
    let attr = field.column.as_ref()?;
    let mut column = ColumnDescriptor::new(field.ident.clone(), &field.ty);
    if let Some(name) = &attr.name {
        column = column.with_column_name(name.clone());
    }
    if let Some(storage_type) = attr.db_type {
        column = column.with_storage_type(storage_type);
    }
    if let Some(adapter) = &attr.adapter {
        column = column.with_adapter(adapter.clone());
    }
    if let Some(value) = &attr.default_value {
        column = column.with_default_value(value.clone());
    }
    if field.primary_key {
        column = column.primary_key();
    }
    Some(column)
}

/// Builds the descriptor of one entity, stopping at the first error.
/// Warnings (private columns) go to the sink and don't abort.
pub fn extract_decl(decl: &EntityDecl, sink: &mut dyn DiagnosticSink) -> Result<EntityDescriptor, AbortError> {
    let mut entity = EntityDescriptor::new(decl.ident.clone(), decl.table_name.clone());
    for field in &decl.fields {
        if let Some(diagnostic) = rules::check_primary_key_is_column(decl, field) {
            return Err(diagnostic.into());
        }
        let Some(column) = column_descriptor(field) else {
            continue;
        };
        if let Some(warning) = rules::check_private_column(decl, field) {
            warning.report_to(sink);
            continue;
        }
        if field.primary_key {
            if let Some(diagnostic) = rules::check_primary_key_type(decl, field) {
                return Err(diagnostic.into());
            }
            if let Some(diagnostic) = rules::check_primary_key_storage(&entity, &column) {
                return Err(diagnostic.into());
            }
            if entity.primary_key().is_some() {
                return Err(rules::duplicate_primary_key(decl, field).into());
            }
            entity.set_primary_key(column);
        } else {
            entity.add_column(column);
        }
    }
    match rules::check_entity_valid(&entity) {
        Some(diagnostic) => Err(diagnostic.into()),
        None => Ok(entity),
    }
}

pub fn extract(item: &ItemStruct, sink: &mut dyn DiagnosticSink) -> Result<EntityDescriptor, AbortError> {
    let decl = EntityDecl::parse(item)?;
    extract_decl(&decl, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Severity};
    use crate::model::{FieldType, StorageType};
    use crate::rules::Rule;
    use syn::parse_quote;

    #[test]
    fn extracts_key_and_columns_in_declaration_order() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "message")]
            pub struct Message {
                #[column(name = "BODY")]
                pub body: String,
                #[column(name = "_ID")]
                #[primary_key]
                pub id: i64,
                #[column(db_type = TEXT, default = "x")]
                pub r#type: Option<String>,
                pub transient: Vec<i32>,
            }
        };
        let mut sink = CollectingSink::default();
        let entity = extract(&item, &mut sink).unwrap();
        assert!(sink.diagnostics.is_empty());
        assert_eq!(entity.table_name, "message");
        let key = entity.primary_key().unwrap();
        assert_eq!(key.column_name, "_ID");
        assert!(key.is_primary_key);
        let names: Vec<&str> = entity.all_columns().iter().map(|c| c.column_name.as_str()).collect();
        assert_eq!(names, ["_ID", "BODY", "TYPE"]);
        let kind = &entity.columns()[1];
        assert!(kind.nullable);
        assert_eq!(kind.field_type, FieldType::String);
        assert_eq!(kind.storage_type, Some(StorageType::Text));
        assert_eq!(kind.default_value.as_deref(), Some("x"));
    }

    #[test]
    fn duplicate_primary_key_aborts_entity() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Twice {
                #[column] #[primary_key] pub a: i64,
                #[column] #[primary_key] pub b: i64,
            }
        };
        let err = extract(&item, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().message, "entity `Twice` must have exactly one primary key");
        assert_eq!(err.diagnostic().rule, Some(Rule::PrimaryKeyAlreadyDefined));
    }

    #[test]
    fn primary_key_must_be_i64() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Narrow { #[column] #[primary_key] pub id: i32 }
        };
        let err = extract(&item, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().message, "primary key `id` must be of type i64");

        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Boxed { #[column] #[primary_key] pub id: Option<i64> }
        };
        assert!(extract(&item, &mut CollectingSink::default()).is_err());
    }

    #[test]
    fn primary_key_must_be_stored_as_int() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct TextKey { #[column(db_type = TEXT)] #[primary_key] pub id: i64 }
        };
        let err = extract(&item, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().message, "primary key `id` must be stored as INT, not TEXT");
        assert_eq!(err.diagnostic().rule, Some(Rule::PrimaryKeyType));

        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct IntKey { #[column(db_type = INT)] #[primary_key] pub id: i64 }
        };
        let entity = extract(&item, &mut CollectingSink::default()).unwrap();
        assert_eq!(entity.primary_key().unwrap().storage_type, Some(StorageType::Int));
    }

    #[test]
    fn primary_key_must_be_a_column() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Bare { #[primary_key] pub id: i64 }
        };
        let err = extract(&item, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().message, "primary key `id` must be a column");
    }

    #[test]
    fn missing_table_or_key_is_invalid() {
        let no_table: ItemStruct = parse_quote! {
            struct NoTable { #[column] #[primary_key] pub id: i64 }
        };
        let err = extract(&no_table, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().message, "invalid entity `NoTable`: missing primary key or table name");

        let no_key: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct NoKey { #[column] pub name: String }
        };
        let err = extract(&no_key, &mut CollectingSink::default()).unwrap_err();
        assert_eq!(err.diagnostic().rule, Some(Rule::InvalidEntity));
    }

    #[test]
    fn private_columns_are_skipped_with_warning() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Hidden {
                #[column] #[primary_key] pub id: i64,
                #[column] secret: String,
                #[column] pub(crate) visible: String,
            }
        };
        let mut sink = CollectingSink::default();
        let entity = extract(&item, &mut sink).unwrap();
        assert_eq!(entity.columns().len(), 1);
        assert_eq!(entity.columns()[0].column_name, "VISIBLE");
        let warnings: Vec<String> = sink.warnings().map(|d| d.message.clone()).collect();
        assert_eq!(warnings, ["`secret` is private, column skipped"]);
        assert_eq!(sink.diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn malformed_attribute_aborts() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Broken { #[column(name = 1)] #[primary_key] pub id: i64 }
        };
        assert!(extract(&item, &mut CollectingSink::default()).is_err());
    }
}
