//! Markdown to HTML conversion.
//!
//! Conversion sits behind the [`MarkdownConverter`] trait so the backend can be
//! replaced when the document loader is constructed. The default backend,
//! [`PulldownConverter`], uses `pulldown-cmark` (CommonMark) with an optional
//! set of extensions described by [`MarkdownExtensions`].
//!
//! # Extensions
//!
//! Extensions are configured explicitly, usually from the
//! `--markdown-extensions` flag or the `PLATEPIPE_MARKDOWN_EXTENSIONS`
//! environment variable, as a comma-separated list:
//!
//! | Name | Effect |
//! |------|--------|
//! | `table` | pipe tables |
//! | `strikethrough` | `~~text~~` |
//! | `tasklist` | `- [x] item` |
//! | `gfm` | `table`, `strikethrough`, `tasklist` and GFM blockquote tags |
//! | `definitionlist` | definition lists |
//! | `footnote` | footnotes |
//! | `typographer` | smart quotes, dashes and ellipses |
//! | `linkify` | accepted, not supported by the backend |
//! | `cjk` | accepted, not supported by the backend |

mod extensions;

pub use extensions::{MarkdownExtension, MarkdownExtensions};

use pulldown_cmark::{Options, Parser, html};
use std::io::Write;
use thiserror::Error;

/// Errors produced while converting Markdown.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Writing the converted HTML failed.
    #[error("writing converted markdown: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a custom converter.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Converts Markdown bytes into HTML written to `out`.
pub trait MarkdownConverter {
    /// Convert `input` and write the resulting HTML to `out`.
    fn convert(&self, input: &[u8], out: &mut dyn Write) -> Result<(), MarkdownError>;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&[u8], &mut dyn Write) -> Result<(), MarkdownError>,
{
    fn convert(&self, input: &[u8], out: &mut dyn Write) -> Result<(), MarkdownError> {
        self(input, out)
    }
}

/// CommonMark converter backed by `pulldown-cmark`.
#[derive(Debug, Clone, Default)]
pub struct PulldownConverter {
    extensions: MarkdownExtensions,
}

impl PulldownConverter {
    /// Create a converter with the given extensions enabled.
    pub fn new(extensions: MarkdownExtensions) -> Self {
        Self {
            extensions,
        }
    }

    /// The enabled extensions.
    pub fn extensions(&self) -> &MarkdownExtensions {
        &self.extensions
    }

    fn options(&self) -> Options {
        let mut options = Options::empty();
        for extension in self.extensions.iter() {
            match extension {
                MarkdownExtension::Table => options.insert(Options::ENABLE_TABLES),
                MarkdownExtension::Strikethrough => options.insert(Options::ENABLE_STRIKETHROUGH),
                MarkdownExtension::TaskList => options.insert(Options::ENABLE_TASKLISTS),
                MarkdownExtension::Gfm => options.insert(
                    Options::ENABLE_TABLES
                        | Options::ENABLE_STRIKETHROUGH
                        | Options::ENABLE_TASKLISTS
                        | Options::ENABLE_GFM,
                ),
                MarkdownExtension::DefinitionList => {
                    options.insert(Options::ENABLE_DEFINITION_LIST)
                }
                MarkdownExtension::Footnote => options.insert(Options::ENABLE_FOOTNOTES),
                MarkdownExtension::Typographer => {
                    options.insert(Options::ENABLE_SMART_PUNCTUATION)
                }
                MarkdownExtension::Linkify | MarkdownExtension::Cjk => {
                    tracing::debug!("Markdown extension '{}' has no effect", extension);
                }
            }
        }
        options
    }
}

impl MarkdownConverter for PulldownConverter {
    fn convert(&self, input: &[u8], out: &mut dyn Write) -> Result<(), MarkdownError> {
        let text = String::from_utf8_lossy(input);
        if matches!(text, std::borrow::Cow::Owned(_)) {
            tracing::warn!("Markdown is not valid UTF-8, invalid bytes replaced");
        }

        let mut rendered = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut rendered, Parser::new_ext(&text, self.options()));

        tracing::debug!(
            "Converted {} bytes of markdown into {} bytes of HTML",
            input.len(),
            rendered.len()
        );

        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}
