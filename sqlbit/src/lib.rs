//! sqlbit derives SQLite persistence code for annotated structs: table DDL, projections,
//! `query_all`/`load`/`save`/`delete` and a type adapter layer converting fields to column values.
//!
//! ```ignore
//! #[entity(table = "contacts")]
//! pub struct ContactEntity {
//!     #[column(name = "_ID")]
//!     #[primary_key]
//!     pub id: i64,
//!     #[column(name = "NAME")]
//!     pub name: String,
//! }
//!
//! database!(pub AppDatabase { ContactEntity });
//!
//! let provider = SqliteProvider::open_in_memory(1, &AppDatabase, TypeAdapterRegistry::new())?;
//! let mut contact = ContactEntity { name: "Ann".into(), ..Default::default() };
//! contact.save(&provider)?;
//! ```

extern crate self as sqlbit;

pub mod adapter;
pub mod entity;
pub mod error;
pub mod logger;
pub mod provider;
pub mod registry;
pub mod sql;
pub mod values;

pub use adapter::*;
pub use chrono;
pub use entity::{EntityHelper, SchemaInstaller};
pub use error::AppError;
pub use inventory;
pub use macros::database;
pub use macros::entity;
pub use macros::Entity;
pub use provider::{DatabaseProvider, SqliteProvider};
pub use registry::{AdapterFactory, TypeAdapterRegistry};
pub use rusqlite;
pub use rusqlite::Row;
pub use values::ContentValues;
