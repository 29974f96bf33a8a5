//! Converts between entry maps and caller-supplied typed records.
//!
//! A record type declares a static field descriptor list; the mapper drives
//! both directions through it. No runtime reflection: the descriptor names
//! the key, carries the per-field configuration and points at plain
//! load/save functions.
//!
//! ```
//! use unreal_ini::mapper::field::{self, FieldOptions};
//! use unreal_ini::{FieldSpec, Record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct GameRules {
//!     goal_score: i64,
//!     mutators: Vec<String>,
//! }
//!
//! impl Record for GameRules {
//!     const FIELDS: &'static [FieldSpec<Self>] = &[
//!         FieldSpec {
//!             name: "GoalScore",
//!             options: FieldOptions::new(),
//!             load: |r, v, _| field::load_scalar(&mut r.goal_score, v),
//!             save: |r, _| field::save_scalar(&r.goal_score),
//!         },
//!         FieldSpec {
//!             name: "Mutators",
//!             options: FieldOptions::new().strip_empty(),
//!             load: |r, v, o| field::load_list(&mut r.mutators, v, o),
//!             save: |r, o| field::save_list(&r.mutators, o),
//!         },
//!     ];
//! }
//! ```

pub mod field;

use crate::error::{Error, Result};
use crate::types::Entries;

pub use field::{FieldError, FieldOptions, FieldSpec, FieldValue};

/// How the record-to-document direction treats keys the record does not
/// model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializeMode {
    /// Record fields overwrite or extend the existing map; unknown keys and
    /// their positions survive a load/save round trip.
    #[default]
    NonDestructive,
    /// The resulting map contains exactly the record's fields.
    DefinedOnly,
}

/// A typed record mappable to and from an entry map.
pub trait Record: Default + 'static {
    /// Static, compile-time-known field descriptor list.
    const FIELDS: &'static [FieldSpec<Self>];

    /// Serialization completeness mode for the reverse direction.
    const MODE: SerializeMode = SerializeMode::NonDestructive;
}

/// Builds a record from an entry map. `scope` is the section or object name
/// used in error detail.
pub fn record_from_entries<R: Record>(entries: &Entries, scope: &str) -> Result<R> {
    let mut record = R::default();
    update_record(&mut record, entries, scope)?;
    Ok(record)
}

/// Fills an existing record from an entry map. Keys without a matching
/// field are silently dropped; a value whose shape cannot populate its
/// field fails with [`Error::TypeMismatch`].
pub fn update_record<R: Record>(record: &mut R, entries: &Entries, scope: &str) -> Result<()> {
    field::fill_record(record, entries).map_err(|e| Error::TypeMismatch {
        section: scope.to_string(),
        key: e.key,
        expected: e.expected,
        found: e.found,
    })
}

/// Converts every non-ignored field of the record, in descriptor order.
pub fn record_entries<R: Record>(record: &R) -> Entries {
    let mut entries = Entries::new();
    for spec in R::FIELDS {
        if spec.options.ignore {
            continue;
        }
        entries.insert(spec.name.to_string(), (spec.save)(record, &spec.options));
    }
    entries
}

/// Writes the record back into an entry map according to the record type's
/// [`SerializeMode`].
pub fn apply_record<R: Record>(record: &R, entries: &mut Entries) {
    match R::MODE {
        SerializeMode::NonDestructive => {
            for spec in R::FIELDS {
                if spec.options.ignore {
                    continue;
                }
                entries.insert(spec.name.to_string(), (spec.save)(record, &spec.options));
            }
        }
        SerializeMode::DefinedOnly => {
            *entries = record_entries(record);
        }
    }
}
