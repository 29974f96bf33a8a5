use std::collections::{HashMap, HashSet};

use crate::types::{Entries, Value};

/// Top-level named group of key/value pairs under a `[Name]` header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub name: String,
    pub entries: Entries,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            entries: Entries::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// A named, typed entry stored under a `[ObjectName TypeName]` header.
///
/// Uniqueness key within a document is the (object name, type name) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectEntry {
    pub object_name: String,
    pub type_name: String,
    pub entries: Entries,
}

impl ObjectEntry {
    pub fn new(object_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        ObjectEntry {
            object_name: object_name.into(),
            type_name: type_name.into(),
            entries: Entries::new(),
        }
    }

    /// The text between the brackets of this entry's header line.
    pub fn header(&self) -> String {
        format!("{} {}", self.object_name, self.type_name)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// Keys observed in the indexed `key[n]=` form, per section or object type
/// name. The writer consults this to re-emit arrays with explicit indices
/// instead of the bare repeated-key form.
#[derive(Clone, Debug, Default)]
pub struct ArrayHints {
    keys: HashMap<String, HashSet<String>>,
}

impl ArrayHints {
    pub fn record(&mut self, scope: &str, key: &str) {
        self.keys
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string());
    }

    pub fn contains(&self, scope: &str, key: &str) -> bool {
        self.keys.get(scope).is_some_and(|keys| keys.contains(key))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A parsed configuration document: sections, per-object entries and the
/// indexed-array hints collected while parsing.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub sections: Vec<Section>,
    pub objects: Vec<ObjectEntry>,
    pub(crate) array_hints: ArrayHints,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    pub fn object(&self, object_name: &str, type_name: &str) -> Option<&ObjectEntry> {
        self.objects
            .iter()
            .find(|o| o.object_name == object_name && o.type_name == type_name)
    }

    pub fn object_mut(&mut self, object_name: &str, type_name: &str) -> Option<&mut ObjectEntry> {
        self.objects
            .iter_mut()
            .find(|o| o.object_name == object_name && o.type_name == type_name)
    }

    /// All per-object entries of one type, in document order.
    pub fn objects_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a ObjectEntry> {
        self.objects.iter().filter(move |o| o.type_name == type_name)
    }

    /// Fetches the section named `name`, creating it at the end of the
    /// document if absent. One section per distinct name per document.
    pub fn get_or_create_section(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }

    /// Fetches the per-object entry keyed by (object name, type name),
    /// creating it if absent. Re-encountering the same pair appends to the
    /// existing entry, never duplicates it.
    pub fn get_or_create_object(&mut self, object_name: &str, type_name: &str) -> usize {
        if let Some(idx) = self
            .objects
            .iter()
            .position(|o| o.object_name == object_name && o.type_name == type_name)
        {
            return idx;
        }
        self.objects.push(ObjectEntry::new(object_name, type_name));
        self.objects.len() - 1
    }

    /// Marks `key` for indexed `key[i]=` re-emission within `scope` (a
    /// section name, or a per-object type name).
    pub fn mark_indexed(&mut self, scope: &str, key: &str) {
        self.array_hints.record(scope, key);
    }

    pub fn is_indexed(&self, scope: &str, key: &str) -> bool {
        self.array_hints.contains(scope, key)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.objects.is_empty()
    }
}
