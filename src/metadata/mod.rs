//! Metadata headers: detection, decoding and the value model.
//!
//! Documents and templates may open with a block of key/value pairs that is
//! not fenced by any delimiter:
//!
//! ```text
//! date = "2024-03-02"
//! site = "example.com"
//! total = 76373
//!
//! The empty line above ends the metadata block.
//! These lines are the document's content.
//! ```
//!
//! The block starts at the first byte of the buffer and runs up to the first
//! pair of consecutive newlines (carriage returns are ignored). A buffer whose
//! first byte cannot start a key is treated as pure content, so authors opt out
//! of metadata by starting the file with a blank line or whitespace.
//!
//! Detection is a heuristic and can flag ordinary prose. Callers decide what a
//! decode failure means; the loaders in [`crate::document`] treat it as "no
//! metadata" and keep the whole buffer as content.
//!
//! # Modules
//!
//! - [`header`] - boundary detection, no parsing
//! - [`decoder`] - pluggable parser for the header bytes (TOML by default)
//! - [`value`] - dynamically typed metadata values

pub mod decoder;
pub mod header;
pub mod value;

pub use decoder::{DecodeError, MetadataParser, TomlParser, decode};
pub use header::detect;
pub use value::{Metadata, MetadataValue};
