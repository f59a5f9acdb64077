//! File extension checks for documents and templates.

use std::path::Path;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "xhtm", "xht"];

/// Returns true if `path` has a known Markdown extension (case-insensitive).
pub fn has_markdown_ext(path: &Path) -> bool {
    has_ext(path, MARKDOWN_EXTENSIONS)
}

/// Returns true if `path` has a known HTML extension (case-insensitive).
pub fn has_html_ext(path: &Path) -> bool {
    has_ext(path, HTML_EXTENSIONS)
}

fn has_ext(path: &Path, known: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| known.iter().any(|k| k.eq_ignore_ascii_case(ext)))
}
