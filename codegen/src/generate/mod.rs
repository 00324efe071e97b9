use crate::diagnostics::AbortError;
use crate::mapping::{self, ResolvedAdapter};
use crate::model::{ColumnDescriptor, EntityDescriptor, StorageType};
use proc_macro2::{Ident, Span, TokenStream};
use syn::spanned::Spanned;

mod create_statement;
mod database;
mod delete;
mod display;
mod expand;
mod helper;
mod load;
mod projection;
mod query_all;
mod row;
mod save;

pub use create_statement::{create_statement, quote_identifier, quote_text};
pub use database::DatabaseMacros;
pub use projection::projection;

#[derive(Clone)]
pub struct FunctionDef {
    pub fn_name: Ident,
    pub fn_stream: TokenStream,
}

/// Column with its storage type and adapter resolved, at its projection position.
#[derive(Clone)]
pub struct ColumnMacros {
    pub column: ColumnDescriptor,
    pub storage_type: StorageType,
    pub adapter: ResolvedAdapter,
    pub position: usize,
}

impl ColumnMacros {
    pub fn new(entity: &EntityDescriptor, column: &ColumnDescriptor, position: usize) -> Result<ColumnMacros, AbortError> {
        let storage_type = mapping::resolve_storage_type(entity, column)?;
        let adapter = mapping::resolve_adapter(entity, column)?;
        Ok(ColumnMacros { column: column.clone(), storage_type, adapter, position })
    }

    pub fn field(&self) -> &Ident {
        &self.column.field_name
    }

    /// Location of a custom adapter path, resolving names at the call site.
    pub fn adapter_span(&self) -> Span {
        match &self.adapter {
            ResolvedAdapter::Custom(path) => Span::call_site().located_at(path.span()),
            ResolvedAdapter::Builtin(_) => Span::call_site(),
        }
    }
}

pub struct EntityMacros {
    pub entity_name: Ident,
    pub table_name: String,
    pub pk: ColumnMacros,
    pub columns: Vec<ColumnMacros>,
    pub create_statement: String,
    pub projection: Vec<String>,
    pub row_functions: Vec<FunctionDef>,
    pub helper_functions: Vec<FunctionDef>,
    pub display_impl: TokenStream,
    pub adapter_assertions: Vec<TokenStream>,
}

impl EntityMacros {
    pub fn new(entity: &EntityDescriptor) -> Result<EntityMacros, AbortError> {
        let pk_column = match entity.primary_key() {
            Some(pk) if entity.is_valid() => pk,
            _ => {
                return Err(crate::rules::check_entity_valid(entity)
                    .map(AbortError::from)
                    .unwrap_or_else(|| AbortError::new(crate::diagnostics::Location::entity(entity), "invalid entity")))
            }
        };
        if let Some(diagnostic) = crate::rules::check_primary_key_storage(entity, pk_column) {
            return Err(diagnostic.into());
        }
        let pk = ColumnMacros::new(entity, pk_column, 0)?;
        let mut columns = Vec::with_capacity(entity.columns().len());
        for (index, column) in entity.columns().iter().enumerate() {
            columns.push(ColumnMacros::new(entity, column, index + 1)?);
        }

        let entity_name = entity.ident.clone();
        let table_name = entity.table_name.clone();
        let create_statement = create_statement(&table_name, &pk, &columns);
        let projection = projection(&pk, &columns);
        let all: Vec<&ColumnMacros> = std::iter::once(&pk).chain(columns.iter()).collect();

        let row_functions = vec![row::read_row_def(&all), row::write_row_def(&pk, &columns)];
        let helper_functions = vec![
            helper::primary_key_def(&pk),
            query_all::fn_def(&table_name),
            load::fn_def(&table_name, &pk),
            save::fn_def(&table_name, &pk),
            delete::fn_def(&table_name, &pk),
        ];
        let display_impl = display::display_impl(&entity_name, &all);
        let adapter_assertions = all.iter().filter_map(|c| row::adapter_assertion(c)).collect();

        Ok(EntityMacros {
            entity_name,
            table_name,
            pk,
            columns,
            create_statement,
            projection,
            row_functions,
            helper_functions,
            display_impl,
            adapter_assertions,
        })
    }
}
