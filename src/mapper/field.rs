use crate::types::Value;

use super::{record_entries, Record};

/// Per-field configuration interpreted by the mapper: fixed array length
/// (save-side padding), empty-entry stripping (load side) and
/// ignore-on-serialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// `0` leaves the length unconstrained. A non-zero length pads the list
    /// with default-valued elements before writing.
    pub array_length: usize,
    /// Drop elements equal to the element type's empty value after loading.
    pub strip_empty: bool,
    /// Exclude this field from the record-to-document direction.
    pub ignore: bool,
}

impl FieldOptions {
    pub const fn new() -> Self {
        FieldOptions {
            array_length: 0,
            strip_empty: false,
            ignore: false,
        }
    }

    pub const fn with_array_length(mut self, length: usize) -> Self {
        self.array_length = length;
        self
    }

    pub const fn strip_empty(mut self) -> Self {
        self.strip_empty = true;
        self
    }

    pub const fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// One entry of a record's static field descriptor list.
///
/// `load` fills the field from a parsed [`Value`]; `save` converts it back.
/// Both are plain function pointers so descriptor lists can live in
/// associated consts; the bodies are one-liners over the `load_*`/`save_*`
/// helpers in this module.
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub options: FieldOptions,
    pub load: fn(&mut T, &Value, &FieldOptions) -> Result<(), FieldError>,
    pub save: fn(&T, &FieldOptions) -> Value,
}

/// A conversion failure, before the mapper attaches the section name.
/// `key` is the path within the record, built up as the error bubbles out of
/// nested structs.
#[derive(Debug)]
pub struct FieldError {
    pub key: String,
    pub expected: &'static str,
    pub found: &'static str,
}

impl FieldError {
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        FieldError {
            key: String::new(),
            expected,
            found: found.kind_name(),
        }
    }

    pub(crate) fn nest(mut self, key: &str) -> Self {
        if self.key.is_empty() {
            self.key = key.to_string();
        } else {
            self.key = format!("{key}.{}", self.key);
        }
        self
    }
}

/// A scalar field type: how it converts to and from [`Value`], and what its
/// empty value looks like for strip-empty and fixed-length padding.
pub trait FieldValue: Default {
    fn from_value(value: &Value) -> Result<Self, FieldError>;
    fn to_value(&self) -> Value;
    fn is_empty_entry(&self) -> bool;
}

impl FieldValue for bool {
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        value
            .as_bool()
            .ok_or_else(|| FieldError::mismatch("bool", value))
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn is_empty_entry(&self) -> bool {
        !*self
    }
}

impl FieldValue for i64 {
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        value
            .as_int()
            .ok_or_else(|| FieldError::mismatch("int", value))
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn is_empty_entry(&self) -> bool {
        *self == 0
    }
}

impl FieldValue for f32 {
    // A whole-number literal parses as Int, so Int widens into float fields.
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        value
            .as_float()
            .ok_or_else(|| FieldError::mismatch("float", value))
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn is_empty_entry(&self) -> bool {
        *self == 0.0
    }
}

impl FieldValue for String {
    fn from_value(value: &Value) -> Result<Self, FieldError> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| FieldError::mismatch("text", value))
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn is_empty_entry(&self) -> bool {
        self.is_empty()
    }
}

pub fn load_scalar<V: FieldValue>(slot: &mut V, value: &Value) -> Result<(), FieldError> {
    *slot = V::from_value(value)?;
    Ok(())
}

/// Fills a sequence field. A single scalar wraps into a one-element vector:
/// the source format cannot tell a one-element array from a scalar unless
/// the key was repeated or indexed.
pub fn load_list<V: FieldValue>(
    slot: &mut Vec<V>,
    value: &Value,
    options: &FieldOptions,
) -> Result<(), FieldError> {
    let mut items = match value {
        Value::List(values) => values
            .iter()
            .map(V::from_value)
            .collect::<Result<Vec<V>, FieldError>>()?,
        single => vec![V::from_value(single)?],
    };

    if options.strip_empty {
        items.retain(|item| !item.is_empty_entry());
    }

    *slot = items;
    Ok(())
}

pub fn load_record<R: Record>(slot: &mut R, value: &Value) -> Result<(), FieldError> {
    match value {
        Value::Struct(entries) => {
            let mut record = R::default();
            fill_record(&mut record, entries)?;
            *slot = record;
            Ok(())
        }
        other => Err(FieldError::mismatch("struct", other)),
    }
}

/// Fills a sequence-of-records field; a lone `Struct` wraps into a
/// one-element vector, like `load_list` does for scalars.
pub fn load_record_list<R: Record>(
    slot: &mut Vec<R>,
    value: &Value,
    _options: &FieldOptions,
) -> Result<(), FieldError> {
    let mut items = Vec::new();
    match value {
        Value::List(values) => {
            for element in values {
                let mut record = R::default();
                load_record(&mut record, element)?;
                items.push(record);
            }
        }
        Value::Struct(_) => {
            let mut record = R::default();
            load_record(&mut record, value)?;
            items.push(record);
        }
        other => return Err(FieldError::mismatch("list of structs", other)),
    }
    *slot = items;
    Ok(())
}

pub fn save_scalar<V: FieldValue>(value: &V) -> Value {
    value.to_value()
}

/// Converts a sequence field, padding with default-valued elements up to the
/// configured fixed array length.
pub fn save_list<V: FieldValue>(list: &[V], options: &FieldOptions) -> Value {
    let mut items: Vec<Value> = list.iter().map(V::to_value).collect();
    while items.len() < options.array_length {
        items.push(V::default().to_value());
    }
    Value::List(items)
}

pub fn save_record<R: Record>(record: &R) -> Value {
    Value::Struct(record_entries(record))
}

pub fn save_record_list<R: Record>(list: &[R], options: &FieldOptions) -> Value {
    let mut items: Vec<Value> = list.iter().map(save_record).collect();
    while items.len() < options.array_length {
        items.push(save_record(&R::default()));
    }
    Value::List(items)
}

/// Copies every entry with a matching field descriptor into the record.
/// Keys without a descriptor are dropped; that is the forward direction's
/// defined behavior, not an error.
pub(crate) fn fill_record<R: Record>(
    record: &mut R,
    entries: &crate::types::Entries,
) -> Result<(), FieldError> {
    for (key, value) in entries {
        if let Some(field) = R::FIELDS.iter().find(|f| f.name == key) {
            (field.load)(record, value, &field.options).map_err(|e| e.nest(key))?;
        }
    }
    Ok(())
}
