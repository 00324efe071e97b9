use rusqlite::types::Value;

/// Column values of one row, in the order adapters wrote them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentValues {
    entries: Vec<(String, Value)>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an already written column.
    pub fn put(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((column.to_string(), value)),
        }
    }

    pub fn put_null(&mut self, column: &str) {
        self.put(column, Value::Null);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}
