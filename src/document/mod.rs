//! Loading documents from files or streams.
//!
//! A document is read completely, its metadata header (if any) is split off
//! and decoded, and the remaining content is optionally converted from
//! Markdown to HTML.
//!
//! Headers that are detected but fail to decode are treated as content: the
//! whole buffer is returned unsplit with empty metadata. Detection is only a
//! heuristic, and a paragraph that happens to start with a word would
//! otherwise abort the run. Markdown conversion failures, on the other hand,
//! are errors.
//!
//! # Example
//!
//! ```
//! use platepipe::document::DocumentLoader;
//! use platepipe::metadata::MetadataValue;
//!
//! let loader = DocumentLoader::default();
//! let doc = loader.from_markdown_stream(&b"title = 'T'\n\n# H\n\npara"[..]).unwrap();
//!
//! assert_eq!(doc.metadata["title"], MetadataValue::from("T"));
//! assert_eq!(doc.content, b"<h1>H</h1>\n<p>para</p>\n");
//! ```

pub mod files;

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::file_error::{FileOperation, FileOperationError, FileResultExt};
use crate::markdown::{MarkdownConverter, MarkdownError, PulldownConverter};
use crate::metadata::{Metadata, MetadataParser, TomlParser, decode, detect};
use crate::templating::Content;

/// Errors produced while loading a document or template source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    File(#[from] FileOperationError),

    /// Reading from a stream (standard input, or any reader) failed.
    #[error("{0}")]
    Stream(#[source] io::Error),

    #[error(transparent)]
    Markdown(#[from] MarkdownError),
}

/// How a document's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text, escaped when inserted into HTML templates.
    Text,
    /// Markdown, converted to HTML before rendering.
    Markdown,
    /// HTML, inserted into templates as-is.
    Html,
}

impl DocumentFormat {
    /// Guess the format from a file extension. Unknown extensions are text.
    pub fn detect(path: &Path) -> Self {
        if files::has_markdown_ext(path) {
            DocumentFormat::Markdown
        } else if files::has_html_ext(path) {
            DocumentFormat::Html
        } else {
            DocumentFormat::Text
        }
    }

    /// Whether content of this format may be inserted into HTML unescaped.
    pub fn is_html_safe(self) -> bool {
        matches!(self, DocumentFormat::Markdown | DocumentFormat::Html)
    }
}

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input, written `-` on the command line.
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret a command line argument; `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("-"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw content and metadata of a loaded source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Content bytes, after the header and after any Markdown conversion.
    pub content: Vec<u8>,
    /// Header metadata; empty when there was no (valid) header.
    pub metadata: Metadata,
}

/// A document ready for the pipeline: content tagged with its HTML safety.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub content: Content,
    pub metadata: Metadata,
    pub format: DocumentFormat,
}

/// Loads documents with an injected metadata parser and Markdown converter.
pub struct DocumentLoader {
    parser: Box<dyn MetadataParser>,
    converter: Box<dyn MarkdownConverter>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(Box::new(TomlParser), Box::new(PulldownConverter::default()))
    }
}

impl fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentLoader").finish_non_exhaustive()
    }
}

impl DocumentLoader {
    /// Create a loader with the given collaborators.
    pub fn new(parser: Box<dyn MetadataParser>, converter: Box<dyn MarkdownConverter>) -> Self {
        Self {
            parser,
            converter,
        }
    }

    /// The metadata parser, also used for variable files.
    pub fn parser(&self) -> &dyn MetadataParser {
        self.parser.as_ref()
    }

    /// Load a file, converting it from Markdown when its extension says so.
    pub fn from_file(&self, path: &Path) -> Result<Document, LoadError> {
        if files::has_markdown_ext(path) {
            self.from_markdown_file(path)
        } else {
            self.from_text_file(path)
        }
    }

    /// Load a Markdown file and convert its content to HTML.
    pub fn from_markdown_file(&self, path: &Path) -> Result<Document, LoadError> {
        let buf = read_file(path)?;
        self.markdown_from_buffer(buf)
    }

    /// Load a Markdown stream and convert its content to HTML.
    pub fn from_markdown_stream(&self, reader: impl Read) -> Result<Document, LoadError> {
        let buf = read_stream(reader)?;
        self.markdown_from_buffer(buf)
    }

    /// Load a file without converting its content.
    pub fn from_text_file(&self, path: &Path) -> Result<Document, LoadError> {
        let buf = read_file(path)?;
        Ok(self.split(buf))
    }

    /// Load a stream without converting its content.
    pub fn from_text_stream(&self, reader: impl Read) -> Result<Document, LoadError> {
        let buf = read_stream(reader)?;
        Ok(self.split(buf))
    }

    /// Load `source` for the pipeline.
    ///
    /// Without an explicit `format`, files are detected by extension and
    /// standard input is plain text.
    pub fn load(
        &self,
        source: &Source,
        format: Option<DocumentFormat>,
    ) -> Result<LoadedDocument, LoadError> {
        match source {
            Source::Stdin => self.load_stream(io::stdin().lock(), format),
            Source::File(path) => {
                let format = format.unwrap_or_else(|| DocumentFormat::detect(path));
                tracing::debug!("Loading document {} as {:?}", path.display(), format);

                let doc = match format {
                    DocumentFormat::Markdown => self.from_markdown_file(path)?,
                    DocumentFormat::Text | DocumentFormat::Html => self.from_text_file(path)?,
                };
                Ok(tag(doc, format, &source.to_string()))
            }
        }
    }

    /// Load a document from any reader; without an explicit `format` the
    /// content is plain text.
    pub fn load_stream(
        &self,
        reader: impl Read,
        format: Option<DocumentFormat>,
    ) -> Result<LoadedDocument, LoadError> {
        let format = format.unwrap_or(DocumentFormat::Text);
        tracing::debug!("Loading document stream as {:?}", format);

        let doc = match format {
            DocumentFormat::Markdown => self.from_markdown_stream(reader)?,
            DocumentFormat::Text | DocumentFormat::Html => self.from_text_stream(reader)?,
        };
        Ok(tag(doc, format, "-"))
    }

    /// Split a buffer into header metadata and content.
    ///
    /// A header that is detected but cannot be decoded is kept as content.
    fn split(&self, mut buf: Vec<u8>) -> Document {
        let Some(pos) = detect(&buf) else {
            return Document {
                content: buf,
                metadata: Metadata::new(),
            };
        };

        match decode(self.parser.as_ref(), &buf[..pos]) {
            Ok(metadata) => {
                let content = buf.split_off(pos);
                Document {
                    content,
                    metadata,
                }
            }
            Err(e) => {
                tracing::debug!("Treating undecodable metadata header as content: {}", e);
                Document {
                    content: buf,
                    metadata: Metadata::new(),
                }
            }
        }
    }

    fn markdown_from_buffer(&self, buf: Vec<u8>) -> Result<Document, LoadError> {
        let doc = self.split(buf);

        let mut html = Vec::with_capacity(doc.content.len() * 3 / 2);
        self.converter.convert(&doc.content, &mut html)?;

        Ok(Document {
            content: html,
            metadata: doc.metadata,
        })
    }
}

/// Read a whole file. The handle is closed before returning.
fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut file = File::open(path).with_file_context(FileOperation::Open, path)?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| FileOperationError::new(FileOperation::Read, path, e))?;
    Ok(buf)
}

fn read_stream(mut reader: impl Read) -> Result<Vec<u8>, LoadError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(LoadError::Stream)?;
    Ok(buf)
}

/// Turn content bytes into text, replacing invalid UTF-8 sequences.
pub(crate) fn decode_text(bytes: Vec<u8>, name: &str) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!("{}: content is not valid UTF-8, invalid bytes replaced", name);
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

fn tag(doc: Document, format: DocumentFormat, name: &str) -> LoadedDocument {
    let text = decode_text(doc.content, name);

    let content = if format.is_html_safe() {
        Content::RawHtml(text)
    } else {
        Content::PlainText(text)
    };

    LoadedDocument {
        content,
        metadata: doc.metadata,
        format,
    }
}
