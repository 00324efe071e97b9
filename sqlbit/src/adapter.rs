//! Conversion between native field values and SQLite column values.

use crate::error::AppError;
use crate::values::ContentValues;
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::Row;

/// Stateless bidirectional converter between a field type and a column value.
///
/// `read` returns `None` for SQL `NULL`. Adapters are created once per registry and shared,
/// so they must not hold per-row state.
pub trait TypeAdapter: Send + Sync + 'static {
    type Value;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<Self::Value>, AppError>;

    fn write(&self, key: &str, value: Option<&Self::Value>, values: &mut ContentValues);
}

macro_rules! impl_native_adapter {
    ($adapter:ident, $t:ty, $to_value:expr) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $adapter;

        impl TypeAdapter for $adapter {
            type Value = $t;

            fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<$t>, AppError> {
                Ok(row.get::<_, Option<$t>>(position)?)
            }

            fn write(&self, key: &str, value: Option<&$t>, values: &mut ContentValues) {
                match value {
                    Some(v) => values.put(key, $to_value(v)),
                    None => values.put_null(key),
                }
            }
        }
    };
}

impl_native_adapter!(ByteAdapter, i8, |v: &i8| Value::Integer(i64::from(*v)));
impl_native_adapter!(ShortAdapter, i16, |v: &i16| Value::Integer(i64::from(*v)));
impl_native_adapter!(IntAdapter, i32, |v: &i32| Value::Integer(i64::from(*v)));
impl_native_adapter!(LongAdapter, i64, |v: &i64| Value::Integer(*v));
impl_native_adapter!(DoubleAdapter, f64, |v: &f64| Value::Real(*v));
impl_native_adapter!(StringAdapter, String, |v: &String| Value::Text(v.clone()));
impl_native_adapter!(ByteArrayAdapter, Vec<u8>, |v: &Vec<u8>| Value::Blob(v.clone()));

/// Stored as `INTEGER` 0 or 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolAdapter;

impl TypeAdapter for BoolAdapter {
    type Value = bool;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<bool>, AppError> {
        Ok(row.get::<_, Option<i64>>(position)?.map(|v| v != 0))
    }

    fn write(&self, key: &str, value: Option<&bool>, values: &mut ContentValues) {
        match value {
            Some(v) => values.put(key, Value::Integer(i64::from(*v))),
            None => values.put_null(key),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FloatAdapter;

impl TypeAdapter for FloatAdapter {
    type Value = f32;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<f32>, AppError> {
        Ok(row.get::<_, Option<f64>>(position)?.map(|v| v as f32))
    }

    fn write(&self, key: &str, value: Option<&f32>, values: &mut ContentValues) {
        match value {
            Some(v) => values.put(key, Value::Real(f64::from(*v))),
            None => values.put_null(key),
        }
    }
}

/// Epoch milliseconds. Zero or negative reads as `None`, `None` is written as 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateAdapter;

impl TypeAdapter for DateAdapter {
    type Value = DateTime<Utc>;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<DateTime<Utc>>, AppError> {
        let millis = row.get::<_, Option<i64>>(position)?.unwrap_or_default();
        if millis > 0 {
            Ok(DateTime::from_timestamp_millis(millis))
        } else {
            Ok(None)
        }
    }

    fn write(&self, key: &str, value: Option<&DateTime<Utc>>, values: &mut ContentValues) {
        let millis = value.map(|v| v.timestamp_millis()).unwrap_or(0);
        values.put(key, Value::Integer(millis));
    }
}

/// Marker for "resolve the adapter from the field type". Never invoked by generated code.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAdapter;

impl TypeAdapter for DefaultAdapter {
    type Value = ();

    fn read(&self, _position: usize, _row: &Row<'_>) -> Result<Option<()>, AppError> {
        Err(AppError::UnsupportedOperation("DefaultAdapter::read"))
    }

    fn write(&self, _key: &str, _value: Option<&()>, _values: &mut ContentValues) {
        crate::error!("DefaultAdapter::write called, the column adapter was not resolved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rusqlite::Connection;

    fn read_with<A: TypeAdapter>(adapter: &A, sql: &str) -> Option<A::Value> {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(sql, [], |row| Ok(adapter.read(0, row))).unwrap().unwrap()
    }

    #[test]
    fn reads_null_as_none() {
        assert_eq!(read_with(&IntAdapter, "SELECT NULL"), None);
        assert_eq!(read_with(&StringAdapter, "SELECT NULL"), None);
        assert_eq!(read_with(&IntAdapter, "SELECT 42"), Some(42));
        assert_eq!(read_with(&BoolAdapter, "SELECT 2"), Some(true));
        assert_eq!(read_with(&FloatAdapter, "SELECT 1.5"), Some(1.5f32));
    }

    #[test]
    fn dates_are_epoch_millis() {
        let date = Utc.timestamp_millis_opt(1_530_000_000_123).unwrap();
        let mut values = ContentValues::new();
        DateAdapter.write("CREATED", Some(&date), &mut values);
        DateAdapter.write("UPDATED", None, &mut values);
        assert_eq!(values.get("CREATED"), Some(&Value::Integer(1_530_000_000_123)));
        assert_eq!(values.get("UPDATED"), Some(&Value::Integer(0)));
        assert_eq!(read_with(&DateAdapter, "SELECT 1530000000123"), Some(date));
        assert_eq!(read_with(&DateAdapter, "SELECT 0"), None);
        assert_eq!(read_with(&DateAdapter, "SELECT NULL"), None);
    }

    #[test]
    fn none_writes_null() {
        let mut values = ContentValues::new();
        StringAdapter.write("NAME", None, &mut values);
        BoolAdapter.write("ACTIVE", Some(&true), &mut values);
        assert_eq!(values.get("NAME"), Some(&Value::Null));
        assert_eq!(values.get("ACTIVE"), Some(&Value::Integer(1)));
    }

    #[test]
    fn default_adapter_fails() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT 1", [], |row| Ok(DefaultAdapter.read(0, row))).unwrap();
        assert!(matches!(result, Err(AppError::UnsupportedOperation(_))));
    }
}
