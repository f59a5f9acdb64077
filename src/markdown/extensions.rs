//! Markdown extension configuration.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A single optional Markdown extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownExtension {
    Table,
    Strikethrough,
    Linkify,
    TaskList,
    Gfm,
    DefinitionList,
    Footnote,
    Typographer,
    Cjk,
}

impl MarkdownExtension {
    /// Every known extension, in documentation order.
    pub const ALL: [MarkdownExtension; 9] = [
        MarkdownExtension::Table,
        MarkdownExtension::Strikethrough,
        MarkdownExtension::Linkify,
        MarkdownExtension::TaskList,
        MarkdownExtension::Gfm,
        MarkdownExtension::DefinitionList,
        MarkdownExtension::Footnote,
        MarkdownExtension::Typographer,
        MarkdownExtension::Cjk,
    ];

    /// The name used in extension lists.
    pub fn name(self) -> &'static str {
        match self {
            MarkdownExtension::Table => "table",
            MarkdownExtension::Strikethrough => "strikethrough",
            MarkdownExtension::Linkify => "linkify",
            MarkdownExtension::TaskList => "tasklist",
            MarkdownExtension::Gfm => "gfm",
            MarkdownExtension::DefinitionList => "definitionlist",
            MarkdownExtension::Footnote => "footnote",
            MarkdownExtension::Typographer => "typographer",
            MarkdownExtension::Cjk => "cjk",
        }
    }

    /// Look up an extension by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ext| ext.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MarkdownExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of enabled Markdown extensions.
///
/// Parsed from a comma-separated list. Unknown names are skipped with a
/// warning rather than rejected, so parsing never fails.
///
/// ```
/// use platepipe::markdown::{MarkdownExtension, MarkdownExtensions};
///
/// let exts: MarkdownExtensions = "Table, footnote,bogus".parse().unwrap();
/// assert!(exts.contains(MarkdownExtension::Table));
/// assert!(exts.contains(MarkdownExtension::Footnote));
/// assert_eq!(exts.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownExtensions {
    enabled: BTreeSet<MarkdownExtension>,
}

impl MarkdownExtensions {
    /// No extensions: plain CommonMark.
    pub fn none() -> Self {
        Self::default()
    }

    /// Enable one extension.
    pub fn with(mut self, extension: MarkdownExtension) -> Self {
        self.enabled.insert(extension);
        self
    }

    /// Whether `extension` is enabled.
    pub fn contains(&self, extension: MarkdownExtension) -> bool {
        self.enabled.contains(&extension)
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Iterate over the enabled extensions.
    pub fn iter(&self) -> impl Iterator<Item = MarkdownExtension> + '_ {
        self.enabled.iter().copied()
    }

    /// Parse a comma-separated list. Unknown names are logged and skipped.
    pub fn from_list(list: &str) -> Self {
        let mut extensions = MarkdownExtensions::none();

        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if let Some(extension) = MarkdownExtension::from_name(name) {
                extensions.enabled.insert(extension);
            } else {
                tracing::warn!("Ignoring unknown markdown extension '{}'", name);
            }
        }

        for unsupported in [MarkdownExtension::Linkify, MarkdownExtension::Cjk] {
            if extensions.contains(unsupported) {
                tracing::warn!(
                    "Markdown extension '{}' is not supported by the converter and will be ignored",
                    unsupported
                );
            }
        }

        extensions
    }
}

impl FromStr for MarkdownExtensions {
    type Err = Infallible;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_list(list))
    }
}

impl FromIterator<MarkdownExtension> for MarkdownExtensions {
    fn from_iter<I: IntoIterator<Item = MarkdownExtension>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}
