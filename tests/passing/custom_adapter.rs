use sqlbit::rusqlite::Row;
use sqlbit::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Celsius(pub f64);

#[derive(Default)]
pub struct CelsiusAdapter;

impl TypeAdapter for CelsiusAdapter {
    type Value = Celsius;

    fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<Celsius>, AppError> {
        Ok(DoubleAdapter.read(position, row)?.map(Celsius))
    }

    fn write(&self, key: &str, value: Option<&Celsius>, values: &mut ContentValues) {
        DoubleAdapter.write(key, value.map(|c| c.0).as_ref(), values)
    }
}

register_adapter!(CelsiusAdapter);

#[entity(table = "readings")]
pub struct Reading {
    #[column]
    #[primary_key]
    pub id: i64,
    #[column(adapter = CelsiusAdapter, db_type = FLOAT)]
    pub temperature: Celsius,
    #[column(adapter = CelsiusAdapter, db_type = FLOAT)]
    pub peak: Option<Celsius>,
}

database!(WeatherDatabase { Reading });

fn main() {
    let provider = SqliteProvider::open_in_memory(1, &WeatherDatabase, TypeAdapterRegistry::new()).unwrap();
    let mut reading = Reading { temperature: Celsius(21.5), ..Default::default() };
    reading.save(&provider).unwrap();
    let mut loaded = Reading { id: reading.id, ..Default::default() };
    loaded.load(&provider).unwrap();
    assert_eq!(loaded, reading);
    assert_eq!(loaded.to_string(), "Reading{id=1, temperature=Celsius(21.5), peak=null}");
}
