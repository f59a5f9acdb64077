//! Run configuration.
//!
//! [`RunConfig`] holds everything a single pipeline run needs. The CLI builds
//! it from parsed arguments (including the `PLATEPIPE_MARKDOWN_EXTENSIONS`
//! environment variable, read through clap); library users can build it
//! directly.
//!
//! ```
//! use platepipe::config::RunConfig;
//! use platepipe::document::Source;
//!
//! let config = RunConfig::new(Source::from_arg("notes.md"), vec!["page.html".into()])
//!     .with_var_defaults("defaults.toml");
//!
//! assert_eq!(config.document.to_string(), "notes.md");
//! assert!(config.var_overrides.is_none());
//! ```

use std::path::PathBuf;

use crate::document::{DocumentFormat, Source};
use crate::markdown::MarkdownExtensions;
use crate::templating::TemplateFormat;

/// Environment variable holding the default Markdown extension list.
pub const MARKDOWN_EXTENSIONS_ENV: &str = "PLATEPIPE_MARKDOWN_EXTENSIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Document to render; `Source::Stdin` for `-`.
    pub document: Source,
    /// Template chain, applied in order.
    pub templates: Vec<PathBuf>,
    /// Forced document format; detected from the extension when `None`.
    pub doc_format: Option<DocumentFormat>,
    /// Forced format for every template; detected per file when `None`.
    pub template_format: Option<TemplateFormat>,
    /// Lowest priority variables.
    pub var_defaults: Option<PathBuf>,
    /// Variables overriding everything except program metadata.
    pub var_overrides: Option<PathBuf>,
    pub markdown_extensions: MarkdownExtensions,
}

impl RunConfig {
    pub fn new(document: Source, templates: Vec<PathBuf>) -> Self {
        Self {
            document,
            templates,
            doc_format: None,
            template_format: None,
            var_defaults: None,
            var_overrides: None,
            markdown_extensions: MarkdownExtensions::none(),
        }
    }

    pub fn with_doc_format(mut self, format: DocumentFormat) -> Self {
        self.doc_format = Some(format);
        self
    }

    pub fn with_template_format(mut self, format: TemplateFormat) -> Self {
        self.template_format = Some(format);
        self
    }

    pub fn with_var_defaults(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_defaults = Some(path.into());
        self
    }

    pub fn with_var_overrides(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_overrides = Some(path.into());
        self
    }

    pub fn with_markdown_extensions(mut self, extensions: MarkdownExtensions) -> Self {
        self.markdown_extensions = extensions;
        self
    }

    /// Template arguments as given, for program metadata and messages.
    pub fn template_names(&self) -> Vec<String> {
        self.templates.iter().map(|p| p.display().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownExtension;

    #[test]
    fn test_builder() {
        let extensions: MarkdownExtensions = "table,footnote".parse().unwrap_or_default();
        let config = RunConfig::new(Source::Stdin, vec!["a.txt".into(), "b.html".into()])
            .with_doc_format(DocumentFormat::Markdown)
            .with_template_format(TemplateFormat::Html)
            .with_var_overrides("over.toml")
            .with_markdown_extensions(extensions);

        assert_eq!(config.doc_format, Some(DocumentFormat::Markdown));
        assert_eq!(config.template_format, Some(TemplateFormat::Html));
        assert_eq!(config.var_overrides, Some(PathBuf::from("over.toml")));
        assert!(config.var_defaults.is_none());
        assert!(config.markdown_extensions.contains(MarkdownExtension::Footnote));
        assert_eq!(config.template_names(), vec!["a.txt".to_string(), "b.html".to_string()]);
    }
}
