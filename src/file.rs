//! File-system boundary and the typed file layer.
//!
//! Loading a path that does not exist yields an empty document; these files
//! are routinely absent until first saved. Saving refuses to replace an
//! existing file unless overwrite is requested.

use std::any::Any;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::mapper::Record;
use crate::registry::{DynRecord, Registry};
use crate::types::Document;
use crate::{decode, encode};

impl Document {
    /// Reads and parses `path`. A missing file is an empty document, not an
    /// error. File bytes are decoded lossily; the grammar itself is ASCII.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("{} does not exist, starting empty", path.display());
            return Ok(Document::new());
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let document = decode::from_str(&text)?;
        debug!(
            "loaded {}: {} sections, {} objects",
            path.display(),
            document.sections.len(),
            document.objects.len()
        );
        Ok(document)
    }

    /// Writes the document to `path`. Fails with [`Error::AlreadyExists`]
    /// when the destination exists and `overwrite` is false.
    pub fn save(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(Error::already_exists(path));
        }

        fs::write(path, encode::to_string(self))?;
        debug!("saved {}", path.display());
        Ok(())
    }
}

/// A document plus the typed records instantiated for registered section
/// names and object type names.
///
/// Typed records are filled from their entries at load time and written
/// back, each according to its serialization mode, before rendering or
/// saving. Sections and objects with no registration stay untyped and are
/// reachable through [`IniFile::document`].
pub struct IniFile {
    document: Document,
    sections: Vec<(String, Box<dyn DynRecord>)>,
    objects: Vec<(String, String, Box<dyn DynRecord>)>,
}

impl IniFile {
    /// Parses `text` and attaches typed records per `registry`.
    pub fn parse(text: &str, registry: &Registry) -> Result<Self> {
        Self::from_document(decode::from_str(text)?, registry)
    }

    /// Loads `path` (missing file: empty) and attaches typed records.
    pub fn load(path: impl AsRef<Path>, registry: &Registry) -> Result<Self> {
        Self::from_document(Document::load(path)?, registry)
    }

    /// Attaches typed records to an already-built document.
    pub fn from_document(document: Document, registry: &Registry) -> Result<Self> {
        let mut sections = Vec::new();
        for section in &document.sections {
            if let Some(mut record) = registry.create_section(&section.name) {
                record.load_entries(&section.entries, &section.name)?;
                sections.push((section.name.clone(), record));
            }
        }

        let mut objects = Vec::new();
        for object in &document.objects {
            if let Some(mut record) = registry.create_object(&object.type_name) {
                record.load_entries(&object.entries, &object.header())?;
                objects.push((
                    object.object_name.clone(),
                    object.type_name.clone(),
                    record,
                ));
            }
        }

        Ok(IniFile {
            document,
            sections,
            objects,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The typed record for the section named `name`, if registered with
    /// type `T` and present in the document.
    pub fn section<T: Record + Any>(&self, name: &str) -> Option<&T> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, record)| record.as_any().downcast_ref())
    }

    pub fn section_mut<T: Record + Any>(&mut self, name: &str) -> Option<&mut T> {
        self.sections
            .iter_mut()
            .find(|(n, _)| n == name)
            .and_then(|(_, record)| record.as_any_mut().downcast_mut())
    }

    /// The typed record for the per-object entry `[name type]`, where the
    /// type name is taken from `T`'s registration.
    pub fn object<T: Record + Any>(&self, object_name: &str) -> Option<&T> {
        self.objects
            .iter()
            .filter(|(n, _, _)| n == object_name)
            .find_map(|(_, _, record)| record.as_any().downcast_ref())
    }

    pub fn object_mut<T: Record + Any>(&mut self, object_name: &str) -> Option<&mut T> {
        self.objects
            .iter_mut()
            .filter(|(n, _, _)| n == object_name)
            .find_map(|(_, _, record)| record.as_any_mut().downcast_mut())
    }

    /// All typed records of one record type, with their object names, in
    /// document order.
    pub fn objects_of_type<T: Record + Any>(&self) -> impl Iterator<Item = (&str, &T)> {
        self.objects.iter().filter_map(|(name, _, record)| {
            record
                .as_any()
                .downcast_ref()
                .map(|typed| (name.as_str(), typed))
        })
    }

    /// Attaches a typed record as the section named `name`, creating the
    /// section if the document does not have it yet.
    pub fn insert_section<T: Record + Any>(&mut self, name: &str, record: T) {
        self.document.get_or_create_section(name);
        if let Some(slot) = self.sections.iter_mut().find(|(n, _)| n == name) {
            slot.1 = Box::new(record);
        } else {
            self.sections.push((name.to_string(), Box::new(record)));
        }
    }

    /// Attaches a typed record as the per-object entry `[name type_name]`.
    pub fn insert_object<T: Record + Any>(&mut self, name: &str, type_name: &str, record: T) {
        self.document.get_or_create_object(name, type_name);
        if let Some(slot) = self
            .objects
            .iter_mut()
            .find(|(n, t, _)| n == name && t == type_name)
        {
            slot.2 = Box::new(record);
        } else {
            self.objects
                .push((name.to_string(), type_name.to_string(), Box::new(record)));
        }
    }

    /// Stores every typed record back into its entry map, then renders the
    /// document.
    pub fn render(&mut self) -> String {
        self.apply_records();
        encode::to_string(&self.document)
    }

    /// Stores typed records back and writes the document to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        self.apply_records();
        self.document.save(path, overwrite)
    }

    fn apply_records(&mut self) {
        for (name, record) in &self.sections {
            if let Some(section) = self.document.section_mut(name) {
                record.store_entries(&mut section.entries);
            }
        }
        for (name, type_name, record) in &self.objects {
            if let Some(object) = self.document.object_mut(name, type_name) {
                record.store_entries(&mut object.entries);
            }
        }
    }
}
