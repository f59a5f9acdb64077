//! Sample documents, templates and variable files for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A named source file with known content.
#[derive(Clone, Debug)]
pub struct SourceFixture {
    pub path: String,
    pub content: String,
}

impl SourceFixture {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Markdown document with a header defining `title` and `author`.
    pub fn markdown_document() -> Self {
        Self::new(
            "doc.md",
            r#"title = "Release notes"
author = "Ops <ops@example.com>"

# Changes

- faster *startup*
"#,
        )
    }

    /// Plain text document with a header and characters HTML must escape.
    pub fn text_document() -> Self {
        Self::new("doc.txt", "title = \"Plain\"\n\nfish & chips < 5 euros\n")
    }

    /// Document without a header.
    pub fn headerless_document() -> Self {
        Self::new("bare.txt", "just content\n")
    }

    /// HTML page template using `title` and `content`.
    pub fn html_template() -> Self {
        Self::new(
            "page.html",
            "lang = \"en\"\n\n<html lang=\"{{ lang }}\"><title>{{ title }}</title><body>{{ content }}</body></html>\n",
        )
    }

    /// Text template printing `title` above the content.
    pub fn text_template() -> Self {
        Self::new("page.txt", "== {{ title }} ==\n{{ content }}")
    }

    /// Template that cannot be parsed.
    pub fn malformed_template() -> Self {
        Self::new("broken.txt", "malformed {{")
    }

    /// A variable file.
    pub fn variables(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content)
    }

    /// Write the fixture below `dir`, creating parent directories.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let full_path = dir.join(&self.path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&full_path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", full_path.display()))?;
        Ok(full_path)
    }
}
