//! Template parsing and rendering with Tera.
//!
//! A [`Template`] wraps a Tera instance holding exactly one compiled template.
//! Text templates insert values verbatim. HTML templates escape every
//! interpolated string after filters have run, except content tagged
//! [`Content::RawHtml`](super::Content::RawHtml).

use regex::Regex;
use std::cell::RefCell;
use std::io::Write;
use strsim::levenshtein;
use tera::Tera;

use super::content::Content;
use super::context::RenderContext;
use super::error::{ErrorLocation, TemplateError};
use super::loader::TemplateFormat;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

const MAX_SUGGESTIONS: usize = 3;

/// Number of source lines shown around an error line in verbose reports.
const ERROR_CONTEXT_LINES: usize = 2;

thread_local! {
    /// Raw HTML content of the render running on this thread.
    static TRUSTED_HTML: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Escape function for HTML templates.
///
/// Tera calls it on every interpolated string. The stage's raw HTML content
/// passes through unchanged; anything else, including filtered content, is
/// escaped.
fn escape_untrusted(input: &str) -> String {
    let trusted = TRUSTED_HTML.with(|html| html.borrow().as_deref() == Some(input));
    if trusted {
        input.to_string()
    } else {
        tera::escape_html(input)
    }
}

/// Marks raw HTML content as trusted for the lifetime of the guard.
struct TrustedHtmlGuard;

impl TrustedHtmlGuard {
    fn new(html: Option<&str>) -> Self {
        TRUSTED_HTML.with(|cell| *cell.borrow_mut() = html.map(str::to_string));
        Self
    }
}

impl Drop for TrustedHtmlGuard {
    fn drop(&mut self) {
        TRUSTED_HTML.with(|cell| *cell.borrow_mut() = None);
    }
}

/// A compiled template.
pub struct Template {
    name: String,
    format: TemplateFormat,
    source: String,
    tera: Tera,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Template {
    /// Compile `source` as a template called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::SyntaxError`] if the source is not a valid Tera
    /// template.
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        format: TemplateFormat,
    ) -> Result<Self, TemplateError> {
        let name = name.into();

        let mut tera = Tera::default();
        match format {
            // An empty suffix matches every template name
            TemplateFormat::Html => {
                tera.autoescape_on(vec![""]);
                tera.set_escape_fn(escape_untrusted);
            }
            TemplateFormat::Text => tera.autoescape_on(Vec::new()),
        }

        tera.add_raw_template(&name, source)
            .map_err(|e| syntax_error(&e, &name, source))?;

        tracing::debug!("Parsed {:?} template '{}' ({} bytes)", format, name, source.len());

        Ok(Self {
            name,
            format,
            source: source.to_string(),
            tera,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> TemplateFormat {
        self.format
    }

    /// Render the template with `context` into a string.
    pub fn render(&self, context: &RenderContext) -> Result<String, TemplateError> {
        let tera_context = context.to_tera();

        let trusted = match context.content() {
            Content::RawHtml(html) if self.format == TemplateFormat::Html => Some(html.as_str()),
            _ => None,
        };
        let _guard = TrustedHtmlGuard::new(trusted);

        self.tera
            .render(&self.name, &tera_context)
            .map_err(|e| self.render_error(&e, context))
    }

    /// Render the template with `context` and write the result to `out`.
    pub fn apply(&self, context: &RenderContext, out: &mut dyn Write) -> Result<(), TemplateError> {
        let rendered = self.render(context)?;
        out.write_all(rendered.as_bytes()).map_err(|source| TemplateError::Io {
            location: Box::new(ErrorLocation::new(&self.name)),
            source,
        })
    }

    fn render_error(&self, error: &tera::Error, context: &RenderContext) -> TemplateError {
        let messages = error_chain(error);
        let location = Box::new(ErrorLocation::new(&self.name));

        if let Some(variable) = messages.iter().find_map(|msg| extract_variable_name(msg)) {
            let available_variables = context.variable_names();
            let suggestions = find_similar_variables(&variable, &available_variables);

            return TemplateError::VariableNotFound {
                variable,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        tracing::debug!("Template '{}' failed to render ({} source bytes)", self.name, self.source.len());

        TemplateError::RenderError {
            message: format_tera_error(&messages),
            location,
        }
    }
}

/// Build a syntax error from a Tera parse failure.
fn syntax_error(error: &tera::Error, name: &str, source: &str) -> TemplateError {
    let messages = error_chain(error);
    let line_number = messages.iter().find_map(|msg| extract_line(msg));

    let context_lines = line_number
        .map(|line| extract_context_lines(source, line, ERROR_CONTEXT_LINES))
        .filter(|lines| !lines.is_empty());

    TemplateError::SyntaxError {
        message: format_tera_error(&messages),
        location: Box::new(ErrorLocation {
            template: name.to_string(),
            line_number,
            context_lines,
        }),
    }
}

/// Collect the messages of an error and all its sources.
fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

/// Reduce a Tera error chain to one line.
///
/// The wrapper messages ("Failed to parse ...", "Failed to render ...") only
/// repeat the template name, which the caller reports already. Parser
/// diagnostics are multi-line; only their "expected ..." notes are kept.
fn format_tera_error(messages: &[String]) -> String {
    let while_rendering = Regex::new(r"\s*while rendering '[^']*'").ok();

    let mut parts = Vec::new();
    for msg in messages {
        let trimmed = msg.trim();
        if trimmed.starts_with("Failed to parse") || trimmed.starts_with("Failed to render") {
            continue;
        }

        let cleaned = match &while_rendering {
            Some(re) => re.replace_all(trimmed, "").to_string(),
            None => trimmed.to_string(),
        };

        let cleaned = if cleaned.contains('\n') {
            summarize_diagnostic(&cleaned)
        } else {
            cleaned
        };

        if !cleaned.is_empty() && !parts.contains(&cleaned) {
            parts.push(cleaned);
        }
    }

    if parts.is_empty() {
        messages.first().cloned().unwrap_or_else(|| "template error".to_string())
    } else {
        parts.join(": ")
    }
}

/// Turn a multi-line parser diagnostic into one line.
fn summarize_diagnostic(diagnostic: &str) -> String {
    let notes: Vec<&str> = diagnostic
        .lines()
        .filter_map(|line| line.trim().strip_prefix("= "))
        .collect();

    if notes.is_empty() {
        diagnostic.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        notes.join("; ")
    }
}

/// Extract variable name from "Variable `foo` not found" message
fn extract_variable_name(error_msg: &str) -> Option<String> {
    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    re.captures(error_msg)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the line number from a parser diagnostic (" --> 3:7")
fn extract_line(error_msg: &str) -> Option<usize> {
    let re = Regex::new(r"-->\s*(\d+):(\d+)").ok()?;
    re.captures(error_msg)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
}

/// Names within the edit-distance threshold of `target`, closest first.
fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|var| (levenshtein(target, var), var))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();

    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, var)| var.clone()).collect()
}

/// Numbered source lines (1-based) within `radius` lines of `line`.
///
/// Empty when `line` is outside the source.
fn extract_context_lines(source: &str, line: usize, radius: usize) -> Vec<(usize, String)> {
    let lines: Vec<&str> = source.lines().collect();
    if line == 0 || line > lines.len() {
        return Vec::new();
    }

    let first = line.saturating_sub(radius).max(1);
    let last = (line + radius).min(lines.len());

    (first..=last).map(|number| (number, lines[number - 1].to_string())).collect()
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
