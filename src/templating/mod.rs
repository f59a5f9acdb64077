//! Template engine for platepipe.
//!
//! Templates are [Tera](https://keats.github.io/tera/) templates, optionally
//! preceded by a metadata header like documents. Each template is rendered
//! with the merged metadata plus a reserved `content` variable that holds the
//! document (for the first stage) or the previous stage's output.
//!
//! # Flavours
//!
//! - **Text** templates insert every value verbatim.
//! - **HTML** templates (detected by an HTML file extension, or forced with
//!   `--template-format html`) escape every string value. The `content`
//!   variable is inserted unescaped when it is already HTML, that is when it
//!   came from a Markdown or HTML document.
//!
//! # Example
//!
//! ```markdown
//! title = "Release notes"
//!
//! <html>
//!   <head><title>{{ title }}</title></head>
//!   <body>{{ content }}</body>
//! </html>
//! ```
//!
//! Every value is a plain Tera value, so the usual Tera constructs work:
//! `{% if draft %}`, `{% for tag in tags %}`, `{{ title | upper }}`.
//! Referencing an undefined variable fails the render with a list of similar
//! names.

mod content;
mod context;
pub mod error;
pub mod loader;
pub mod renderer;

pub use content::Content;
pub use context::{CONTENT_KEY, RenderContext};
pub use error::{ErrorLocation, TemplateError};
pub use loader::{TemplateFormat, TemplateLoadError, TemplateLoader};
pub use renderer::Template;
