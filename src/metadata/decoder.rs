//! Decoding of metadata header bytes.
//!
//! The header syntax is delegated to a [`MetadataParser`]. [`TomlParser`] is
//! the default; any other parser (or a plain closure with the same shape) can
//! be injected wherever a loader is constructed.
//!
//! ```
//! use platepipe::metadata::{MetadataValue, TomlParser, decode};
//!
//! let data = decode(&TomlParser, b"strkey = 'value'\nintkey = 10").unwrap();
//! assert_eq!(data["strkey"], MetadataValue::from("value"));
//! assert_eq!(data["intkey"], MetadataValue::Integer(10));
//! ```

use thiserror::Error;

use super::value::{Metadata, from_toml_table};

/// Errors produced while decoding a metadata block.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The header bytes are not valid UTF-8.
    #[error("metadata is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The header is not valid TOML.
    #[error("toml: {}", .0.message().trim_end())]
    Toml(#[from] toml::de::Error),

    /// Error reported by a custom parser.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Parser for the contents of a metadata block.
pub trait MetadataParser {
    /// Parse `header` into a flat mapping.
    fn parse(&self, header: &[u8]) -> Result<Metadata, DecodeError>;
}

impl<F> MetadataParser for F
where
    F: Fn(&[u8]) -> Result<Metadata, DecodeError>,
{
    fn parse(&self, header: &[u8]) -> Result<Metadata, DecodeError> {
        self(header)
    }
}

/// Default parser: the header is a TOML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl MetadataParser for TomlParser {
    fn parse(&self, header: &[u8]) -> Result<Metadata, DecodeError> {
        let text = std::str::from_utf8(header)?;
        let table: toml::Table = toml::from_str(text)?;
        Ok(from_toml_table(table))
    }
}

/// Decode a metadata block with `parser`.
///
/// On success the mapping is returned as-is, nested values included. On
/// failure no partial mapping is kept; what the error means is the caller's
/// decision.
pub fn decode(parser: &dyn MetadataParser, header: &[u8]) -> Result<Metadata, DecodeError> {
    let data = parser.parse(header)?;
    tracing::debug!("Decoded metadata block with {} key(s)", data.len());
    Ok(data)
}
