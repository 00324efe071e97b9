use super::ColumnMacros;
use crate::model::StorageType;

/// Backtick-quotes an identifier, embedded backticks are doubled.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quotes a text literal, embedded quotes are doubled.
pub fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn column_definition(column: &ColumnMacros) -> String {
    let mut definition = format!("{} {}", quote_identifier(&column.column.column_name), column.storage_type.sql_type());
    if let Some(value) = column.column.default_value.as_deref().filter(|v| !v.is_empty()) {
        let value = match column.storage_type {
            StorageType::Text => quote_text(value),
            _ => value.to_string(),
        };
        definition.push_str(" DEFAULT ");
        definition.push_str(&value);
    }
    definition
}

pub fn create_statement(table_name: &str, pk: &ColumnMacros, columns: &[ColumnMacros]) -> String {
    let mut definitions = Vec::with_capacity(columns.len() + 1);
    definitions.push(format!(
        "{} {} PRIMARY KEY AUTOINCREMENT",
        quote_identifier(&pk.column.column_name),
        pk.storage_type.sql_type()
    ));
    definitions.extend(columns.iter().map(column_definition));
    format!("CREATE TABLE IF NOT EXISTS {} ({})", quote_identifier(table_name), definitions.join(", "))
}
