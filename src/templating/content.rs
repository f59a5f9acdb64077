//! Renderable content threaded through the pipeline.

use std::fmt;

/// The content a template stage receives as its `content` variable.
///
/// The variant records whether the text is already HTML (converted Markdown,
/// HTML documents, and everything rendered from them) or plain text that an
/// HTML template must escape. The variant is chosen once when the document is
/// loaded and kept for every stage's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Safe for unescaped insertion into HTML.
    RawHtml(String),
    /// Escaped when inserted into HTML templates.
    PlainText(String),
}

impl Content {
    /// The text, regardless of variant.
    pub fn as_str(&self) -> &str {
        match self {
            Content::RawHtml(s) | Content::PlainText(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Content::RawHtml(s) | Content::PlainText(s) => s,
        }
    }

    /// Whether the text may be inserted into HTML unescaped.
    pub fn is_html_safe(&self) -> bool {
        matches!(self, Content::RawHtml(_))
    }

    /// Wrap `text` in the same variant as `self`.
    pub fn retag(&self, text: String) -> Content {
        match self {
            Content::RawHtml(_) => Content::RawHtml(text),
            Content::PlainText(_) => Content::PlainText(text),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
