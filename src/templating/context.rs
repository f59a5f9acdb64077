//! Render context building.
//!
//! The render context is the merged metadata mapping plus the reserved
//! `content` variable. Only `content` changes between pipeline stages.

use tera::Context as TeraContext;

use super::content::Content;
use crate::metadata::Metadata;

/// Name of the variable holding the current stage's content.
pub const CONTENT_KEY: &str = "content";

/// Data a template is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    data: Metadata,
    content: Content,
}

impl RenderContext {
    /// Create a context. A `content` key in `data` is shadowed by `content`.
    pub fn new(data: Metadata, content: Content) -> Self {
        Self {
            data,
            content,
        }
    }

    pub fn data(&self) -> &Metadata {
        &self.data
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Replace the content, leaving every other variable untouched.
    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    /// Names of the top-level variables visible to templates.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.data.keys().cloned().collect();
        if !self.data.contains_key(CONTENT_KEY) {
            names.push(CONTENT_KEY.to_string());
        }
        names
    }

    /// Build the Tera context.
    ///
    /// Values are inserted unescaped; HTML templates escape at output time.
    pub(crate) fn to_tera(&self) -> TeraContext {
        let mut context = TeraContext::new();
        for (key, value) in &self.data {
            context.insert(key.as_str(), value);
        }
        context.insert(CONTENT_KEY, self.content.as_str());
        context
    }

    /// Log the context as JSON at debug level.
    pub(crate) fn log(&self) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }

        match serde_json::to_string(&self.data) {
            Ok(json) => tracing::debug!(
                "Render context: {} (content: {} bytes, html safe: {})",
                json,
                self.content.as_str().len(),
                self.content.is_html_safe()
            ),
            Err(e) => tracing::debug!("Render context could not be serialized: {}", e),
        }
    }
}
