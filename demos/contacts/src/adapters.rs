use sqlbit::rusqlite::types::Type;
use sqlbit::rusqlite::{self, Row};
use sqlbit::{register_adapter, AppError, ContentValues, StringAdapter, TypeAdapter};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uri(String);

impl Uri {
    pub fn parse(value: impl Into<String>) -> Uri {
        Uri(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UriAdapter;

impl TypeAdapter for UriAdapter {
    type Value = Uri;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<Uri>, AppError> {
        Ok(row.get::<_, Option<String>>(position)?.map(Uri))
    }

    fn write(&self, key: &str, value: Option<&Uri>, values: &mut ContentValues) {
        StringAdapter.write(key, value.map(|uri| uri.0.clone()).as_ref(), values)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Incoming,
    Outgoing,
}

impl MessageKind {
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::Incoming => "INCOMING",
            MessageKind::Outgoing => "OUTGOING",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown message kind `{0}`")]
pub struct UnknownMessageKind(pub String);

impl FromStr for MessageKind {
    type Err = UnknownMessageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOMING" => Ok(MessageKind::Incoming),
            "OUTGOING" => Ok(MessageKind::Outgoing),
            other => Err(UnknownMessageKind(other.to_string())),
        }
    }
}

/// Stores the variant name as `TEXT`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageKindAdapter;

impl TypeAdapter for MessageKindAdapter {
    type Value = MessageKind;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<MessageKind>, AppError> {
        row.get::<_, Option<String>>(position)?
            .map(|name| name.parse::<MessageKind>())
            .transpose()
            .map_err(|e| AppError::Sqlite(rusqlite::Error::FromSqlConversionFailure(position, Type::Text, Box::new(e))))
    }

    fn write(&self, key: &str, value: Option<&MessageKind>, values: &mut ContentValues) {
        StringAdapter.write(key, value.map(|kind| kind.name().to_string()).as_ref(), values)
    }
}

register_adapter!(UriAdapter);
register_adapter!(MessageKindAdapter);
