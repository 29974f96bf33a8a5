mod document;
mod value;

pub use document::{ArrayHints, Document, ObjectEntry, Section};
pub use value::{Entries, Value};
