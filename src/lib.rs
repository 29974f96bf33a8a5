//! Parser, writer and typed mapper for the Unreal-style INI dialect.
//!
//! The dialect extends plain INI with per-object `[Name Type]` headers,
//! `(...)` struct literals, two array spellings (bare repeated keys and
//! indexed `key[n]=`), inferred value types and a `Class'` object-reference
//! prefix. Parsing produces an order-preserving [`Document`]; writing
//! re-emits each array in the spelling it arrived in.
//!
//! ```
//! let doc = unreal_ini::from_str("[Engine]\nTickRate=30\n").unwrap();
//! let rate = doc.section("Engine").and_then(|s| s.get("TickRate"));
//! assert_eq!(rate.and_then(|v| v.as_int()), Some(30));
//! assert_eq!(unreal_ini::to_string(&doc), "[Engine]\nTickRate=30\n\n");
//! ```
//!
//! Typed access goes through [`Record`] descriptors, a [`Registry`] binding
//! section and object type names to record types, and [`IniFile`] gluing
//! the two together; see the [`mapper`] module docs for a record example.

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod file;
pub mod mapper;
pub mod registry;
pub mod types;

pub use crate::error::{Error, Result};
pub use crate::file::IniFile;
pub use crate::mapper::{FieldOptions, FieldSpec, Record, SerializeMode};
pub use crate::registry::{DynRecord, Registry};
pub use crate::types::{Document, Entries, ObjectEntry, Section, Value};

/// Parses a complete document from text.
pub fn from_str(text: &str) -> Result<Document> {
    decode::from_str(text)
}

/// Renders a document back to text. Rendering never fails; every value a
/// document can hold has a spelling.
pub fn to_string(document: &Document) -> String {
    encode::to_string(document)
}
