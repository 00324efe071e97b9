use crate::entity::SchemaInstaller;
use crate::error::AppError;
use crate::registry::TypeAdapterRegistry;
use rusqlite::Connection;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Source of database connections and of the adapter registry used by generated code.
pub trait DatabaseProvider {
    type Handle<'a>: Deref<Target = Connection>
    where
        Self: 'a;

    fn readable_handle(&self) -> Result<Self::Handle<'_>, AppError>;

    fn writable_handle(&self) -> Result<Self::Handle<'_>, AppError>;

    fn adapters(&self) -> &TypeAdapterRegistry;
}

/// Single SQLite connection guarded by a mutex, versioned through `PRAGMA user_version`.
pub struct SqliteProvider {
    conn: Mutex<Connection>,
    registry: TypeAdapterRegistry,
}

impl SqliteProvider {
    pub fn open(
        path: impl AsRef<Path>,
        version: u32,
        installer: &dyn SchemaInstaller,
        registry: TypeAdapterRegistry,
    ) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, version, installer, registry)
    }

    pub fn open_in_memory(version: u32, installer: &dyn SchemaInstaller, registry: TypeAdapterRegistry) -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, version, installer, registry)
    }

    pub fn from_connection(
        conn: Connection,
        version: u32,
        installer: &dyn SchemaInstaller,
        registry: TypeAdapterRegistry,
    ) -> Result<Self, AppError> {
        if version < 1 {
            return Err(AppError::InvalidVersion(version));
        }
        let current = user_version(&conn)?;
        if current > version {
            return Err(AppError::Downgrade { current, requested: version });
        }
        if current < version {
            let tx = conn.unchecked_transaction()?;
            if current == 0 {
                crate::info!("creating schema version {}", version);
                installer.create_schema(&tx)?;
            } else {
                crate::info!("upgrading schema from version {} to {}", current, version);
                installer.upgrade_schema(&tx, current, version)?;
            }
            tx.pragma_update(None, "user_version", version)?;
            tx.commit()?;
        }
        Ok(SqliteProvider { conn: Mutex::new(conn), registry })
    }

    pub fn version(&self) -> Result<u32, AppError> {
        user_version(&*self.conn.lock()?)
    }
}

fn user_version(conn: &Connection) -> Result<u32, AppError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

impl DatabaseProvider for SqliteProvider {
    type Handle<'a> = MutexGuard<'a, Connection>;

    fn readable_handle(&self) -> Result<Self::Handle<'_>, AppError> {
        Ok(self.conn.lock()?)
    }

    fn writable_handle(&self) -> Result<Self::Handle<'_>, AppError> {
        Ok(self.conn.lock()?)
    }

    fn adapters(&self) -> &TypeAdapterRegistry {
        &self.registry
    }
}
