//! Top-level error type and user-facing error reporting.
//!
//! Every module has its own error enum. [`PlatepipeError`] wraps them with the
//! context of the step that failed and decides the process exit code:
//!
//! | Variant | Message prefix | Exit code |
//! |---------|----------------|-----------|
//! | `Usage` | none | 1 |
//! | `Document` | `error reading document:` | 2 |
//! | `Template` | `error loading template:` | 2 |
//! | `Variables` | `error loading variables:` | 2 |
//! | `Render` | `error applying template:` | 2 |
//! | `Output` | `error writing output:` | 2 |
//!
//! Messages are printed to stderr as `<program>: <message>`. Usage errors are
//! followed by a dimmed hint pointing at `--help`.

use colored::Colorize;
use std::io;
use thiserror::Error;

use crate::document::LoadError;
use crate::pipeline::PipelineError;
use crate::templating::{TemplateError, TemplateLoadError};
use crate::variables::VariablesError;

/// Exit code for invalid invocations.
pub const EXIT_USAGE: u8 = 1;

/// Exit code for failures while running the pipeline.
pub const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Error)]
pub enum PlatepipeError {
    /// The command line is invalid (missing arguments, unknown values).
    #[error("{0}")]
    Usage(String),

    #[error("error reading document: {0}")]
    Document(#[source] LoadError),

    #[error("error loading template: {0}")]
    Template(#[from] TemplateLoadError),

    #[error("error loading variables: {0}")]
    Variables(#[from] VariablesError),

    #[error("error applying template: {0}")]
    Render(#[from] PipelineError),

    #[error("error writing output: {0}")]
    Output(#[source] io::Error),
}

impl PlatepipeError {
    pub fn usage(message: impl Into<String>) -> Self {
        PlatepipeError::Usage(message.into())
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, PlatepipeError::Usage(_))
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            EXIT_USAGE
        } else {
            EXIT_FAILURE
        }
    }

    /// The template error behind this error, if any.
    pub fn template_error(&self) -> Option<&TemplateError> {
        match self {
            PlatepipeError::Template(TemplateLoadError::Parse(e)) => Some(e),
            PlatepipeError::Render(e) => Some(&e.source),
            _ => None,
        }
    }

    /// Extra lines shown in verbose mode: template source around the error
    /// and the variables that were available.
    pub fn details(&self) -> Option<String> {
        let report = self.template_error()?.format_with_context();
        let (_, rest) = report.split_once('\n')?;
        let rest = rest.trim_matches('\n');
        (!rest.is_empty()).then(|| rest.to_string())
    }

    /// Print the error to stderr, prefixed with `progname`.
    pub fn display(&self, progname: &str, verbose: bool) {
        eprintln!("{progname}: {self}");

        if verbose {
            if let Some(details) = self.details() {
                eprintln!("{}", details.yellow());
            }
        }

        if self.is_usage() {
            eprintln!("{}", format!("Usage: {progname} [OPTIONS] [DOCUMENT] [TEMPLATE]...").dimmed());
            eprintln!("{}", format!("Try '{progname} --help' for more information.").dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_error::{FileOperation, FileOperationError};
    use crate::templating::ErrorLocation;

    fn missing(path: &str) -> FileOperationError {
        FileOperationError::new(
            FileOperation::Open,
            path,
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        )
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PlatepipeError::usage("no document specified").exit_code(), 1);
        assert_eq!(PlatepipeError::Document(LoadError::File(missing("doc.md"))).exit_code(), 2);
        assert_eq!(PlatepipeError::Output(io::Error::other("closed")).exit_code(), 2);
    }

    #[test]
    fn test_messages() {
        assert_eq!(PlatepipeError::usage("no templates specified").to_string(), "no templates specified");
        assert_eq!(
            PlatepipeError::Document(LoadError::File(missing("doc.md"))).to_string(),
            "error reading document: open doc.md: no such file or directory"
        );
        assert_eq!(
            PlatepipeError::Template(TemplateLoadError::Load(LoadError::File(missing("t.html")))).to_string(),
            "error loading template: open t.html: no such file or directory"
        );
    }

    #[test]
    fn test_render_error_details() {
        let err = PlatepipeError::Render(PipelineError {
            stage: 1,
            template: "page.txt".into(),
            source: TemplateError::VariableNotFound {
                variable: "titel".into(),
                available_variables: Box::new(vec!["title".into()]),
                suggestions: Box::new(vec!["title".into()]),
                location: Box::new(ErrorLocation::new("page.txt")),
            },
        });

        assert_eq!(
            err.to_string(),
            "error applying template: stage 1: page.txt: variable 'titel' not found (did you mean 'title'?)"
        );
        let details = err.details().unwrap_or_default();
        assert!(details.starts_with("Available variables:"));
        assert!(details.contains("  - title"));
    }

    #[test]
    fn test_no_details_for_plain_errors() {
        assert!(PlatepipeError::usage("x").details().is_none());

        let bare = PlatepipeError::Render(PipelineError {
            stage: 1,
            template: "page.txt".into(),
            source: TemplateError::RenderError {
                message: "boom".into(),
                location: Box::new(ErrorLocation::new("page.txt")),
            },
        });
        assert!(bare.details().is_none());
    }
}
