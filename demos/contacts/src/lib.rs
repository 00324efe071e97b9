pub mod adapters;
pub mod demo;

pub use adapters::*;
pub use sqlbit::*;

use chrono::{DateTime, Utc};
use std::path::Path;

pub const DATABASE_VERSION: u32 = 1;

#[entity(table = "contacts")]
pub struct ContactEntity {
    #[column(name = "_ID")]
    #[primary_key]
    pub id: i64,
    #[column(name = "FIRST_NAME")]
    pub first_name: Option<String>,
    #[column(name = "LAST_NAME")]
    pub last_name: Option<String>,
    #[column(name = "PHONE_NUMBER")]
    pub phone_number: Option<String>,
    #[column(name = "PHOTO_URI", adapter = UriAdapter, db_type = TEXT)]
    pub photo_uri: Option<Uri>,
    #[column(name = "SMALL_PHOTO_URI", adapter = UriAdapter, db_type = TEXT)]
    pub small_photo_uri: Option<Uri>,
}

impl ContactEntity {
    pub fn full_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().filter(|s| !s.is_empty());
        let last = self.last_name.as_deref().filter(|s| !s.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

#[entity(table = "message")]
pub struct MessageEntity {
    #[column(name = "_ID")]
    #[primary_key]
    pub id: i64,
    #[column]
    pub body: Option<String>,
    #[column(name = "MESSAGE_DATE")]
    pub message_date: Option<DateTime<Utc>>,
    #[column(name = "READ_COUNTER", default = 1)]
    pub read_counter: i32,
    #[column(name = "USERPIC", adapter = UriAdapter, db_type = TEXT)]
    pub image: Option<Uri>,
    #[column(name = "MESSAGE_TYPE", adapter = MessageKindAdapter, db_type = TEXT)]
    pub message_kind: MessageKind,
}

database!(pub AppDatabase { ContactEntity, MessageEntity });

pub fn open(path: impl AsRef<Path>) -> Result<SqliteProvider, AppError> {
    SqliteProvider::open(path, DATABASE_VERSION, &AppDatabase, TypeAdapterRegistry::new())
}

pub fn open_in_memory() -> Result<SqliteProvider, AppError> {
    SqliteProvider::open_in_memory(DATABASE_VERSION, &AppDatabase, TypeAdapterRegistry::new())
}
