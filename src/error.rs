use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by parsing, mapping and the file layer.
///
/// Malformed input lines are never errors; the parser skips what it cannot
/// interpret. The only fatal parse condition is a key that mixes the scalar
/// and array conventions within one section.
#[derive(Debug, Error)]
pub enum Error {
    /// A key already stored as a scalar was later used as an array within the
    /// same section, or the other way around.
    #[error("array key {section}.{key} has already been defined as {found}; \
             remove keys named '{key}' with inconsistent value forms")]
    FormatInconsistency {
        section: String,
        key: String,
        found: &'static str,
    },

    /// A value's runtime shape cannot populate a record field.
    #[error("cannot convert {section}.{key} from {found} to {expected}")]
    TypeMismatch {
        section: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Save target exists and overwrite was not requested.
    #[error("destination file {} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn format_inconsistency(
        section: impl Into<String>,
        key: impl Into<String>,
        found: &'static str,
    ) -> Self {
        Error::FormatInconsistency {
            section: section.into(),
            key: key.into(),
            found,
        }
    }

    pub(crate) fn already_exists(path: impl Into<PathBuf>) -> Self {
        Error::AlreadyExists { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
