use crate::error::AppError;
use crate::provider::DatabaseProvider;
use rusqlite::Connection;

/// Persistence operations generated by `#[derive(Entity)]`.
pub trait EntityHelper: Sized {
    const TABLE_NAME: &'static str;
    const CREATE_STATEMENT: &'static str;
    /// Column names, primary key first.
    const PROJECTION: &'static [&'static str];

    fn primary_key(&self) -> i64;

    fn query_all<P: DatabaseProvider>(provider: &P) -> Result<Vec<Self>, AppError>;

    /// Populates `self` from the row with its primary key, leaves it untouched when there is none.
    fn load<P: DatabaseProvider>(&mut self, provider: &P) -> Result<(), AppError>;

    /// Updates by primary key when it is set, inserts and assigns the new rowid otherwise.
    fn save<P: DatabaseProvider>(&mut self, provider: &P) -> Result<(), AppError>;

    /// Returns the number of deleted rows. The primary key is reset to 0 when a row was deleted.
    fn delete<P: DatabaseProvider>(&mut self, provider: &P) -> Result<usize, AppError>;
}

/// Creates the tables of a set of entities, generated by `database!`.
pub trait SchemaInstaller {
    fn create_schema(&self, db: &Connection) -> Result<(), AppError>;

    fn upgrade_schema(&self, db: &Connection, old_version: u32, new_version: u32) -> Result<(), AppError>;
}
