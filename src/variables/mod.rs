//! Merging and loading of key/value variable mappings.
//!
//! Mappings come from many places during a run: the document header, every
//! template header, variable files given on the command line, and metadata the
//! program derives itself. [`coalesce`] folds them into the single mapping a
//! template is rendered with.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::file_error::{FileOperation, FileOperationError};
use crate::metadata::{DecodeError, Metadata, MetadataParser, decode};

/// Merge `maps` into one mapping. Earlier maps have priority over later ones.
///
/// Only top-level keys are compared; a nested table in a higher-priority map
/// replaces the whole table of a lower-priority one. The inputs are not
/// modified, and an empty input yields an empty mapping.
///
/// # Examples
///
/// ```
/// use platepipe::metadata::{Metadata, MetadataValue};
/// use platepipe::variables::coalesce;
///
/// let high = Metadata::from([("b".to_string(), MetadataValue::Integer(2))]);
/// let low = Metadata::from([
///     ("b".to_string(), MetadataValue::Integer(9)),
///     ("c".to_string(), MetadataValue::Integer(3)),
/// ]);
///
/// let merged = coalesce([&high, &low]);
/// assert_eq!(merged["b"], MetadataValue::Integer(2));
/// assert_eq!(merged["c"], MetadataValue::Integer(3));
/// ```
pub fn coalesce<'a, I>(maps: I) -> Metadata
where
    I: IntoIterator<Item = &'a Metadata>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut merged = Metadata::new();

    for map in maps.into_iter().rev() {
        for (key, value) in map {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Errors produced while loading a variable file.
#[derive(Debug, Error)]
pub enum VariablesError {
    #[error(transparent)]
    Io(#[from] FileOperationError),

    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Load a variable file: the whole file is one metadata mapping.
///
/// Unlike metadata headers, a variable file that fails to decode is an error.
pub fn load_file(path: &Path, parser: &dyn MetadataParser) -> Result<Metadata, VariablesError> {
    let buf = std::fs::read(path)
        .map_err(|e| FileOperationError::new(FileOperation::Read, path, e))?;

    let data = decode(parser, &buf).map_err(|source| VariablesError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded {} variable(s) from {}", data.len(), path.display());
    Ok(data)
}

/// Load a variable file if a path was given, or return an empty mapping.
pub fn load_optional(
    path: Option<&Path>,
    parser: &dyn MetadataParser,
) -> Result<Metadata, VariablesError> {
    match path {
        Some(path) => load_file(path, parser),
        None => Ok(Metadata::new()),
    }
}
