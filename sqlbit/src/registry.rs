use crate::adapter::*;
use crate::error::AppError;
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Zero-argument constructor of a type adapter, erased so it can be collected by `inventory`.
#[derive(Clone, Copy)]
pub struct AdapterFactory {
    pub type_id: fn() -> TypeId,
    pub type_name: fn() -> &'static str,
    pub create: fn() -> Arc<dyn Any + Send + Sync>,
}

impl AdapterFactory {
    pub const fn of<A: TypeAdapter + Default>() -> Self {
        Self { type_id: TypeId::of::<A>, type_name: type_name::<A>, create: || Arc::new(A::default()) as Arc<dyn Any + Send + Sync> }
    }
}

inventory::collect!(AdapterFactory);

/// Registers a custom adapter with every [`TypeAdapterRegistry::new`] in the program.
/// The adapter must implement `Default`.
#[macro_export]
macro_rules! register_adapter {
    ($adapter:ty) => {
        $crate::inventory::submit! {
            $crate::AdapterFactory::of::<$adapter>()
        }
    };
}

/// Cache of adapter instances keyed by adapter type, created on first lookup.
pub struct TypeAdapterRegistry {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    factories: RwLock<HashMap<TypeId, AdapterFactory>>,
}

impl Default for TypeAdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeAdapterRegistry {
    /// Built-in adapters plus every adapter submitted with [`register_adapter!`].
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut factories = registry.factories.write().unwrap_or_else(|e| e.into_inner());
            for factory in builtin_factories().into_iter() {
                factories.insert((factory.type_id)(), factory);
            }
            for factory in inventory::iter::<AdapterFactory> {
                factories.insert((factory.type_id)(), *factory);
            }
        }
        registry
    }

    pub fn empty() -> Self {
        Self { instances: RwLock::new(HashMap::new()), factories: RwLock::new(HashMap::new()) }
    }

    pub fn register<A: TypeAdapter>(&self, factory: fn() -> A) -> Result<(), AppError> {
        let id = TypeId::of::<A>();
        self.instances.write()?.insert(id, Arc::new(factory()));
        self.factories.write()?.remove(&id);
        Ok(())
    }

    pub fn is_registered<A: TypeAdapter>(&self) -> Result<bool, AppError> {
        let id = TypeId::of::<A>();
        Ok(self.instances.read()?.contains_key(&id) || self.factories.read()?.contains_key(&id))
    }

    pub fn adapter<A: TypeAdapter>(&self) -> Result<Arc<A>, AppError> {
        let id = TypeId::of::<A>();
        let cached = self.instances.read()?.get(&id).cloned();
        let erased = match cached {
            Some(erased) => erased,
            None => {
                let create = self
                    .factories
                    .read()?
                    .get(&id)
                    .map(|f| f.create)
                    .ok_or_else(|| AppError::AdapterNotRegistered(type_name::<A>().to_string()))?;
                let created = create();
                let mut instances = self.instances.write()?;
                instances.entry(id).or_insert(created).clone()
            }
        };
        Arc::downcast::<A>(erased).map_err(|_| AppError::AdapterMismatch(type_name::<A>().to_string()))
    }
}

fn builtin_factories() -> [AdapterFactory; 10] {
    [
        AdapterFactory::of::<BoolAdapter>(),
        AdapterFactory::of::<ByteAdapter>(),
        AdapterFactory::of::<ShortAdapter>(),
        AdapterFactory::of::<IntAdapter>(),
        AdapterFactory::of::<LongAdapter>(),
        AdapterFactory::of::<FloatAdapter>(),
        AdapterFactory::of::<DoubleAdapter>(),
        AdapterFactory::of::<StringAdapter>(),
        AdapterFactory::of::<ByteArrayAdapter>(),
        AdapterFactory::of::<DateAdapter>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ContentValues;
    use rusqlite::Row;

    #[derive(Default)]
    struct UpperAdapter;

    impl TypeAdapter for UpperAdapter {
        type Value = String;

        fn read(&self, position: usize, row: &Row<'_>) -> Result<Option<String>, AppError> {
            Ok(row.get::<_, Option<String>>(position)?.map(|s| s.to_lowercase()))
        }

        fn write(&self, key: &str, value: Option<&String>, values: &mut ContentValues) {
            StringAdapter.write(key, value.map(|v| v.to_uppercase()).as_ref(), values)
        }
    }

    #[test]
    fn builtins_are_preregistered_and_cached() {
        let registry = TypeAdapterRegistry::new();
        let first = registry.adapter::<StringAdapter>().unwrap();
        let second = registry.adapter::<StringAdapter>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.is_registered::<DateAdapter>().unwrap());
    }

    #[test]
    fn unregistered_adapter_fails() {
        let registry = TypeAdapterRegistry::new();
        match registry.adapter::<UpperAdapter>() {
            Err(AppError::AdapterNotRegistered(name)) => assert!(name.ends_with("UpperAdapter")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(matches!(TypeAdapterRegistry::empty().adapter::<StringAdapter>(), Err(AppError::AdapterNotRegistered(_))));
    }

    #[test]
    fn explicit_registration() {
        let registry = TypeAdapterRegistry::new();
        registry.register(|| UpperAdapter).unwrap();
        let adapter = registry.adapter::<UpperAdapter>().unwrap();
        let mut values = ContentValues::new();
        adapter.write("NAME", Some(&"ann".to_string()), &mut values);
        assert_eq!(values.get("NAME"), Some(&rusqlite::types::Value::Text("ANN".into())));
    }

    #[test]
    fn concurrent_first_lookups_share_one_instance() {
        let registry = Arc::new(TypeAdapterRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.adapter::<LongAdapter>().unwrap())
            })
            .collect();
        let adapters: Vec<Arc<LongAdapter>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(adapters.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
