use sqlbit::rusqlite::Connection;
use sqlbit::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct RecordingInstaller {
    created: AtomicU32,
    upgrades: Mutex<Vec<(u32, u32)>>,
}

impl SchemaInstaller for RecordingInstaller {
    fn create_schema(&self, db: &Connection) -> Result<(), AppError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        db.execute_batch("CREATE TABLE IF NOT EXISTS `t` (`_ID` INTEGER PRIMARY KEY AUTOINCREMENT)")?;
        Ok(())
    }

    fn upgrade_schema(&self, _db: &Connection, old_version: u32, new_version: u32) -> Result<(), AppError> {
        self.upgrades.lock()?.push((old_version, new_version));
        Ok(())
    }
}

#[test]
fn fresh_database_is_created_and_versioned() {
    let installer = RecordingInstaller::default();
    let provider = SqliteProvider::open_in_memory(3, &installer, TypeAdapterRegistry::new()).unwrap();
    assert_eq!(installer.created.load(Ordering::SeqCst), 1);
    assert!(installer.upgrades.lock().unwrap().is_empty());
    assert_eq!(provider.version().unwrap(), 3);
}

#[test]
fn reopening_upgrades_or_keeps_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let installer = RecordingInstaller::default();

    drop(SqliteProvider::open(&path, 1, &installer, TypeAdapterRegistry::new()).unwrap());
    drop(SqliteProvider::open(&path, 1, &installer, TypeAdapterRegistry::new()).unwrap());
    assert_eq!(installer.created.load(Ordering::SeqCst), 1);

    let provider = SqliteProvider::open(&path, 2, &installer, TypeAdapterRegistry::new()).unwrap();
    assert_eq!(*installer.upgrades.lock().unwrap(), [(1, 2)]);
    assert_eq!(provider.version().unwrap(), 2);
    drop(provider);

    match SqliteProvider::open(&path, 1, &installer, TypeAdapterRegistry::new()) {
        Err(AppError::Downgrade { current, requested }) => assert_eq!((current, requested), (2, 1)),
        other => panic!("expected downgrade error, got {:?}", other.err()),
    }
}

#[test]
fn version_zero_is_rejected() {
    let installer = RecordingInstaller::default();
    assert!(matches!(
        SqliteProvider::open_in_memory(0, &installer, TypeAdapterRegistry::new()),
        Err(AppError::InvalidVersion(0))
    ));
}

#[derive(Clone, Copy, Debug, Default)]
struct CsvAdapter;

impl TypeAdapter for CsvAdapter {
    type Value = Vec<String>;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<Vec<String>>, AppError> {
        Ok(row.get::<_, Option<String>>(position)?.map(|s| s.split(',').map(str::to_string).collect()))
    }

    fn write(&self, key: &str, value: Option<&Vec<String>>, values: &mut ContentValues) {
        StringAdapter.write(key, value.map(|v| v.join(",")).as_ref(), values)
    }
}

register_adapter!(CsvAdapter);

#[test]
fn adapters_submitted_at_compile_time_are_registered() {
    let registry = TypeAdapterRegistry::new();
    assert!(registry.is_registered::<CsvAdapter>().unwrap());
    assert!(!TypeAdapterRegistry::empty().is_registered::<CsvAdapter>().unwrap());

    let adapter = registry.adapter::<CsvAdapter>().unwrap();
    let mut values = ContentValues::new();
    adapter.write("TAGS", Some(&vec!["a".to_string(), "b".to_string()]), &mut values);
    assert_eq!(values.get("TAGS"), Some(&rusqlite::types::Value::Text("a,b".into())));
}
