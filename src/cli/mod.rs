//! Command-line interface for platepipe.
//!
//! ```text
//! platepipe [OPTIONS] [DOCUMENT] [TEMPLATE]...
//! ```
//!
//! The document is rendered through every template in order and the result is
//! written to standard output. `-` as the document reads standard input.
//!
//! # Options
//!
//! | Option | Alias | Meaning |
//! |--------|-------|---------|
//! | `--var-defaults <FILE>` | `--vd` | lowest priority variables |
//! | `--var-overrides <FILE>` | `--vo` | variables overriding headers |
//! | `--doc-format <txt\|md\|html>` | `--df` | document format, default autodetect |
//! | `--template-format <txt\|html>` | `--tf` | template format, default autodetect |
//! | `--markdown-extensions <LIST>` | | Markdown extensions, also `PLATEPIPE_MARKDOWN_EXTENSIONS` |
//! | `-v`, `--verbose` | | debug logging and detailed template errors |
//! | `-q`, `--quiet` | | no logging |
//!
//! # Exit codes
//!
//! - `0`: success, `--help` or `--version`
//! - `1`: usage error
//! - `2`: the document, a template or a variable file could not be processed

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{MARKDOWN_EXTENSIONS_ENV, RunConfig};
use crate::core::PlatepipeError;
use crate::document::{DocumentFormat, Source};
use crate::markdown::MarkdownExtensions;
use crate::pipeline;
use crate::templating::TemplateFormat;

/// Fallback program name for messages.
pub const PROGRAM_NAME: &str = "platepipe";

const EXAMPLES: &str = "\
EXAMPLES:
  platepipe doc.txt template.txt
        render doc.txt through template.txt, using variables from their headers

  platepipe doc.txt t1.txt t2.txt t3.txt
        render doc.txt through every template in order; earlier header
        variables win over later definitions of the same variable

  platepipe doc.md template.html
        convert doc.md to HTML, then render it through template.html

  platepipe --df txt doc.md template.txt
        do not convert doc.md to HTML before rendering

  platepipe --tf txt doc.txt template.html
        treat template.html as a plain text template

  cat doc.txt | platepipe --vd defaults.toml - template.html
        read the document from standard input, with default variables

The short option names take two dashes (--vd, --vo, --df, --tf). A single
dash starts a group of one-letter flags, so -vd is read as -v -d and rejected.
Help and version output go to standard output.";

/// Document format names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocFormatArg {
    /// Plain text
    Txt,
    /// Markdown, converted to HTML
    Md,
    /// HTML, inserted unescaped
    Html,
}

impl From<DocFormatArg> for DocumentFormat {
    fn from(arg: DocFormatArg) -> Self {
        match arg {
            DocFormatArg::Txt => DocumentFormat::Text,
            DocFormatArg::Md => DocumentFormat::Markdown,
            DocFormatArg::Html => DocumentFormat::Html,
        }
    }
}

/// Template format names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormatArg {
    /// Values inserted verbatim
    Txt,
    /// Values HTML-escaped
    Html,
}

impl From<TemplateFormatArg> for TemplateFormat {
    fn from(arg: TemplateFormatArg) -> Self {
        match arg {
            TemplateFormatArg::Txt => TemplateFormat::Text,
            TemplateFormatArg::Html => TemplateFormat::Html,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "platepipe",
    version,
    about = "Render a document through a chain of templates",
    long_about = "Render a document through a chain of templates.\n\n\
        The document and every template may start with a TOML metadata header \
        terminated by a blank line. Header variables, variable files and \
        program metadata are merged and made available to every template, \
        along with `content`: the document for the first template, the \
        previous template's output for the others.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Document to render; `-` reads standard input
    #[arg(value_name = "DOCUMENT")]
    document: Option<String>,

    /// Templates to apply, in order
    #[arg(value_name = "TEMPLATE")]
    templates: Vec<PathBuf>,

    /// Variables used when not defined anywhere in the pipeline
    #[arg(long, visible_alias = "vd", value_name = "FILE")]
    var_defaults: Option<PathBuf>,

    /// Variables superseding every header in the pipeline
    #[arg(long, visible_alias = "vo", value_name = "FILE")]
    var_overrides: Option<PathBuf>,

    /// Document format [default: autodetect, txt for standard input]
    #[arg(long, visible_alias = "df", value_enum, value_name = "FORMAT")]
    doc_format: Option<DocFormatArg>,

    /// Template format [default: autodetect]
    #[arg(long, visible_alias = "tf", value_enum, value_name = "FORMAT")]
    template_format: Option<TemplateFormatArg>,

    /// Comma-separated Markdown extensions (table, strikethrough, tasklist,
    /// gfm, definitionlist, footnote, typographer)
    #[arg(long, env = MARKDOWN_EXTENSIONS_ENV, value_name = "LIST")]
    markdown_extensions: Option<String>,

    /// Enable debug logging and detailed template errors
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable all logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Build the run configuration.
    ///
    /// Fails with a usage error when the document or the templates are
    /// missing.
    pub fn into_config(self) -> Result<RunConfig, PlatepipeError> {
        let document = self
            .document
            .ok_or_else(|| PlatepipeError::usage("no document specified"))?;

        if self.templates.is_empty() {
            return Err(PlatepipeError::usage("no templates specified"));
        }

        let extensions = self
            .markdown_extensions
            .as_deref()
            .map(MarkdownExtensions::from_list)
            .unwrap_or_else(MarkdownExtensions::none);

        Ok(RunConfig {
            document: Source::from_arg(&document),
            templates: self.templates,
            doc_format: self.doc_format.map(Into::into),
            template_format: self.template_format.map(Into::into),
            var_defaults: self.var_defaults,
            var_overrides: self.var_overrides,
            markdown_extensions: extensions,
        })
    }

    /// Log filter for the parsed flags. `RUST_LOG` applies only when neither
    /// `--verbose` nor `--quiet` is given.
    pub fn log_filter(&self) -> EnvFilter {
        if self.quiet {
            EnvFilter::new("off")
        } else if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    /// Install the stderr log subscriber.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Run the pipeline, writing the result to standard output.
    pub fn execute(self) -> Result<(), PlatepipeError> {
        let config = self.into_config()?;

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        pipeline::run(&config, &mut out)
    }
}

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    /// Help or version was requested; the text is ready to print.
    Info(clap::Error),
    Invalid(PlatepipeError),
}

/// Parse arguments, separating help/version requests from usage errors.
pub fn parse<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Parsed::Run(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Parsed::Info(e)
        }
        Err(e) => Parsed::Invalid(usage_error(&e)),
    }
}

/// Turn a clap error into a one-line usage error.
pub fn usage_error(error: &clap::Error) -> PlatepipeError {
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    let message = first.strip_prefix("error: ").unwrap_or(first);
    PlatepipeError::usage(message)
}

/// Base name of the running executable.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_ref()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| PROGRAM_NAME.to_string())
}
