//! platepipe - render documents through chains of templates
//!
//! A document (plain text, Markdown or HTML) is rendered through one or more
//! templates in order. Each template receives the previous stage's output as
//! `content`, plus a set of variables merged from metadata headers, variable
//! files and program metadata.
//!
//! # Metadata headers
//!
//! Documents and templates may start with an undelimited TOML header. The
//! header ends at the first blank line and must start with a quote or an ASCII
//! letter or digit:
//!
//! ```text
//! title = "Weekly report"
//! tags = ["ops", "weekly"]
//!
//! # This week
//! ...
//! ```
//!
//! A header that looks like one but does not decode is kept as content.
//!
//! # Core Modules
//!
//! ## Loading
//! - [`metadata`] - Header detection and decoding, the [`metadata::Metadata`] mapping
//! - [`document`] - Document loading with optional Markdown conversion
//! - [`markdown`] - Markdown to HTML conversion and extension configuration
//! - [`variables`] - Variable files and priority merging
//!
//! ## Rendering
//! - [`templating`] - Tera templates with text and HTML flavours
//! - [`pipeline`] - Metadata merging and the template chain
//!
//! ## Application
//! - [`cli`] - Command line parsing, logging setup
//! - [`config`] - Run configuration
//! - [`core`] - Error types and exit codes
//!
//! # Example
//!
//! ```
//! use platepipe::document::{DocumentFormat, DocumentLoader};
//! use platepipe::pipeline::Pipeline;
//! use platepipe::templating::{Template, TemplateFormat};
//!
//! let documents = DocumentLoader::default();
//! let doc = documents
//!     .load_stream(&b"title = 'Hello'\n\n*world*"[..], Some(DocumentFormat::Markdown))
//!     .unwrap();
//!
//! let page = Template::parse("page.html", "<h1>{{ title }}</h1>{{ content }}", TemplateFormat::Html)
//!     .unwrap();
//!
//! let output = Pipeline::new(vec![page]).run(doc.content, doc.metadata).unwrap();
//! assert_eq!(output.as_str(), "<h1>Hello</h1><p><em>world</em></p>\n");
//! ```

pub mod cli;
pub mod config;
pub mod core;

pub mod document;
pub mod markdown;
pub mod metadata;
pub mod variables;

pub mod pipeline;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
