//! Statement helpers called by generated entity code.

use crate::error::AppError;
use crate::values::ContentValues;
use rusqlite::{params_from_iter, Connection, Row};

pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quote_identifier(c)).collect::<Vec<_>>().join(", ")
}

pub fn query_all<T, F>(conn: &Connection, table: &str, projection: &[&str], mut read: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(&Row<'_>) -> Result<T, AppError>,
{
    let sql = format!("SELECT {} FROM {}", column_list(projection), quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut entities = Vec::new();
    while let Some(row) = rows.next()? {
        entities.push(read(row)?);
    }
    Ok(entities)
}

/// Runs `read` on the row with the given key. Returns false when there is none.
pub fn query_by_key<F>(conn: &Connection, table: &str, projection: &[&str], key_column: &str, key: i64, read: F) -> Result<bool, AppError>
where
    F: FnOnce(&Row<'_>) -> Result<(), AppError>,
{
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        column_list(projection),
        quote_identifier(table),
        quote_identifier(key_column)
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([key])?;
    match rows.next()? {
        Some(row) => {
            read(row)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Returns the rowid of the inserted row.
pub fn insert(conn: &Connection, table: &str, values: &ContentValues) -> Result<i64, AppError> {
    let sql = if values.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table))
    } else {
        let columns: Vec<&str> = values.columns().collect();
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
        format!("INSERT INTO {} ({}) VALUES ({})", quote_identifier(table), column_list(&columns), placeholders.join(", "))
    };
    conn.execute(&sql, params_from_iter(values.values()))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_by_key(conn: &Connection, table: &str, values: &ContentValues, key_column: &str, key: i64) -> Result<usize, AppError> {
    if values.is_empty() {
        return Ok(0);
    }
    let assignments: Vec<String> = values
        .columns()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", quote_identifier(column), i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        quote_identifier(table),
        assignments.join(", "),
        quote_identifier(key_column),
        values.len() + 1
    );
    let key = rusqlite::types::Value::Integer(key);
    Ok(conn.execute(&sql, params_from_iter(values.values().chain(std::iter::once(&key))))?)
}

pub fn delete_by_key(conn: &Connection, table: &str, key_column: &str, key: i64) -> Result<usize, AppError> {
    let sql = format!("DELETE FROM {} WHERE {} = ?1", quote_identifier(table), quote_identifier(key_column));
    Ok(conn.execute(&sql, [key])?)
}
