//! Maps section names and per-object type names to typed record
//! definitions. Names registered here get a typed record instance attached
//! when a file is loaded; unregistered names stay as generic untyped
//! sections in the document.

use std::any::Any;
use std::collections::HashMap;

use crate::error::Result;
use crate::mapper::{self, Record};
use crate::types::Entries;

/// Object-safe bridge over [`Record`], so the registry and the typed file
/// layer can hold records of mixed types. Blanket-implemented for every
/// record; callers get their concrete type back by downcasting.
pub trait DynRecord: Any {
    fn load_entries(&mut self, entries: &Entries, scope: &str) -> Result<()>;
    fn store_entries(&self, entries: &mut Entries);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Record + Any> DynRecord for T {
    fn load_entries(&mut self, entries: &Entries, scope: &str) -> Result<()> {
        mapper::update_record(self, entries, scope)
    }

    fn store_entries(&self, entries: &mut Entries) {
        mapper::apply_record(self, entries);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

type RecordFactory = fn() -> Box<dyn DynRecord>;

/// Registered record definitions, keyed by section name and by per-object
/// type name. Registration happens ahead of parsing.
#[derive(Default)]
pub struct Registry {
    sections: HashMap<String, RecordFactory>,
    object_types: HashMap<String, RecordFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Binds a record type to a `[Name]` section header. The first
    /// registration for a name wins.
    pub fn register_section<T: Record + Any>(&mut self, name: &str) -> &mut Self {
        self.sections
            .entry(name.to_string())
            .or_insert(|| Box::new(T::default()));
        self
    }

    /// Binds a record type to the type-name half of `[Name Type]` headers.
    pub fn register_object_type<T: Record + Any>(&mut self, type_name: &str) -> &mut Self {
        self.object_types
            .entry(type_name.to_string())
            .or_insert(|| Box::new(T::default()));
        self
    }

    pub(crate) fn create_section(&self, name: &str) -> Option<Box<dyn DynRecord>> {
        self.sections.get(name).map(|factory| factory())
    }

    pub(crate) fn create_object(&self, type_name: &str) -> Option<Box<dyn DynRecord>> {
        self.object_types.get(type_name).map(|factory| factory())
    }
}
