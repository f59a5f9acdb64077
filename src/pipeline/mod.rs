//! The rendering pipeline.
//!
//! A run loads the document, the template chain and the variable files,
//! merges every metadata mapping by priority, and then renders the templates
//! in order. Each stage sees the previous stage's output as `content`; only
//! the final output is written.
//!
//! # Variable priority
//!
//! From highest to lowest:
//!
//! 1. program metadata (`platepipe.*`)
//! 2. the `--var-overrides` file
//! 3. the document header
//! 4. template headers, in chain order
//! 5. the `--var-defaults` file

use std::io::Write;
use thiserror::Error;

use crate::config::RunConfig;
use crate::core::PlatepipeError;
use crate::document::DocumentLoader;
use crate::markdown::PulldownConverter;
use crate::metadata::{Metadata, MetadataValue, TomlParser};
use crate::templating::{Content, RenderContext, Template, TemplateError, TemplateLoader};
use crate::variables::{self, coalesce};

/// Key of the table holding program metadata.
pub const PROGRAM_KEY: &str = "platepipe";

/// A template stage failed.
#[derive(Debug, Error)]
#[error("stage {stage}: {source}")]
pub struct PipelineError {
    /// 1-based position of the failing template in the chain.
    pub stage: usize,
    pub template: String,
    #[source]
    pub source: TemplateError,
}

/// Metadata describing the current run, available as `platepipe.*`.
///
/// `directory` is empty when the working directory cannot be determined.
pub fn program_metadata(document: &str, templates: &[String]) -> Metadata {
    let directory = std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();

    let info = Metadata::from([
        ("time".to_string(), MetadataValue::from(chrono::Local::now().to_rfc3339())),
        ("document".to_string(), MetadataValue::from(document)),
        (
            "templates".to_string(),
            MetadataValue::Array(templates.iter().map(|t| MetadataValue::from(t.as_str())).collect()),
        ),
        ("directory".to_string(), MetadataValue::from(directory)),
    ]);

    Metadata::from([(PROGRAM_KEY.to_string(), MetadataValue::Table(info))])
}

/// Merge the metadata of one run in priority order.
pub fn merge_metadata(
    program: &Metadata,
    overrides: &Metadata,
    document: &Metadata,
    templates: &[Metadata],
    defaults: &Metadata,
) -> Metadata {
    let chain: Vec<&Metadata> = [program, overrides, document]
        .into_iter()
        .chain(templates)
        .chain([defaults])
        .collect();

    coalesce(chain)
}

/// An ordered chain of templates.
#[derive(Debug, Default)]
pub struct Pipeline {
    templates: Vec<Template>,
}

impl Pipeline {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            templates,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render every stage in order, starting with `initial` as `content`.
    ///
    /// Every stage output keeps the variant of `initial`: a pipeline fed with
    /// HTML keeps passing HTML. Stops at the first failing stage.
    pub fn run(&self, initial: Content, data: Metadata) -> Result<Content, PipelineError> {
        let mut context = RenderContext::new(data, initial);
        context.log();
        tracing::debug!("Running pipeline with {} stage(s)", self.len());

        for (index, template) in self.templates.iter().enumerate() {
            tracing::debug!("Rendering stage {} with template '{}'", index + 1, template.name());

            let output = template.render(&context).map_err(|source| PipelineError {
                stage: index + 1,
                template: template.name().to_string(),
                source,
            })?;

            let next = context.content().retag(output);
            context.set_content(next);
        }

        Ok(context.into_content())
    }
}

/// Execute one complete run and write the final output to `out`.
///
/// Nothing is written unless every stage succeeds.
pub fn run(config: &RunConfig, out: &mut dyn Write) -> Result<(), PlatepipeError> {
    let converter = PulldownConverter::new(config.markdown_extensions.clone());
    let documents = DocumentLoader::new(Box::new(TomlParser), Box::new(converter));

    let document = documents
        .load(&config.document, config.doc_format)
        .map_err(PlatepipeError::Document)?;

    let loader = TemplateLoader::new(&documents);
    let mut templates = Vec::with_capacity(config.templates.len());
    let mut template_metadata = Vec::with_capacity(config.templates.len());
    for path in &config.templates {
        let (template, metadata) = loader.from_file(path, config.template_format)?;
        templates.push(template);
        template_metadata.push(metadata);
    }

    let overrides = variables::load_optional(config.var_overrides.as_deref(), documents.parser())?;
    let defaults = variables::load_optional(config.var_defaults.as_deref(), documents.parser())?;

    let program = program_metadata(&config.document.to_string(), &config.template_names());
    let data = merge_metadata(&program, &overrides, &document.metadata, &template_metadata, &defaults);
    tracing::debug!("Merged {} top-level variable(s)", data.len());

    let output = Pipeline::new(templates).run(document.content, data)?;

    out.write_all(output.as_str().as_bytes()).map_err(PlatepipeError::Output)?;
    out.flush().map_err(PlatepipeError::Output)?;
    Ok(())
}
