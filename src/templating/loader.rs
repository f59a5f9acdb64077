//! Loading templates from files or streams.
//!
//! Templates carry metadata headers exactly like documents. They are always
//! read with the text loader; a `.md` template is not converted.

use std::io::Read;
use std::path::Path;
use thiserror::Error;

use super::error::TemplateError;
use super::renderer::Template;
use crate::document::{Document, DocumentLoader, LoadError, decode_text, files};
use crate::metadata::Metadata;

/// Flavour of a template, deciding whether inserted values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    /// Values are inserted verbatim.
    #[default]
    Text,
    /// Values are HTML-escaped unless the content is already HTML.
    Html,
}

impl TemplateFormat {
    /// HTML for HTML file extensions, text otherwise.
    pub fn detect(path: &Path) -> Self {
        if files::has_html_ext(path) {
            TemplateFormat::Html
        } else {
            TemplateFormat::Text
        }
    }
}

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] TemplateError),
}

/// Loads templates using a document loader for reading and header splitting.
#[derive(Debug, Clone, Copy)]
pub struct TemplateLoader<'a> {
    documents: &'a DocumentLoader,
}

impl<'a> TemplateLoader<'a> {
    pub fn new(documents: &'a DocumentLoader) -> Self {
        Self {
            documents,
        }
    }

    /// Load and compile the template at `path`, returning it with its header
    /// metadata. Without an explicit format the extension decides.
    pub fn from_file(
        &self,
        path: &Path,
        format: Option<TemplateFormat>,
    ) -> Result<(Template, Metadata), TemplateLoadError> {
        let format = format.unwrap_or_else(|| TemplateFormat::detect(path));
        tracing::debug!("Loading template {} as {:?}", path.display(), format);

        let doc = self.documents.from_text_file(path)?;
        compile(&path.display().to_string(), doc, format)
    }

    /// Load and compile a template from `reader`. `name` identifies it in
    /// error messages.
    pub fn from_stream(
        &self,
        name: &str,
        reader: impl Read,
        format: TemplateFormat,
    ) -> Result<(Template, Metadata), TemplateLoadError> {
        let doc = self.documents.from_text_stream(reader)?;
        compile(name, doc, format)
    }
}

fn compile(
    name: &str,
    doc: Document,
    format: TemplateFormat,
) -> Result<(Template, Metadata), TemplateLoadError> {
    let source = decode_text(doc.content, name);
    let template = Template::parse(name, &source, format)?;
    Ok((template, doc.metadata))
}
