//! Template error handling
//!
//! Structured errors for template parsing and rendering, with enough
//! location information to produce one-line messages for the CLI and a more
//! detailed report for verbose output.

/// Template errors with location details
#[derive(Debug)]
pub enum TemplateError {
    /// A variable used by the template is not defined in the render context.
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    /// The template source could not be parsed.
    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// Rendering failed for any other reason (bad filter arguments, type
    /// errors, ...).
    RenderError {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// Writing rendered output failed.
    Io {
        location: Box<ErrorLocation>,
        source: std::io::Error,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Template name, usually its file path
    pub template: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Source lines around the error, with 1-indexed line numbers
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl ErrorLocation {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    fn prefix(&self) -> String {
        match self.line_number {
            Some(line) => format!("{}:{}", self.template, line),
            None => self.template.clone(),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                suggestions,
                location,
                ..
            } => {
                write!(f, "{}: variable '{}' not found", location.prefix(), variable)?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean '{}'?)", suggestions.join("', '"))?;
                }
                Ok(())
            }
            TemplateError::SyntaxError {
                message,
                location,
            } => {
                write!(f, "{}: syntax error: {}", location.prefix(), message)
            }
            TemplateError::RenderError {
                message,
                location,
            } => {
                write!(f, "{}: {}", location.prefix(), message)
            }
            TemplateError::Io {
                location,
                source,
            } => {
                write!(f, "{}: writing output: {}", location.prefix(), source)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Io {
                source,
                ..
            } => Some(source),
            _ => None,
        }
    }
}

impl TemplateError {
    /// Where the error happened
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            }
            | TemplateError::RenderError {
                location,
                ..
            }
            | TemplateError::Io {
                location,
                ..
            } => location,
        }
    }

    /// Multi-line report with source context and available variables
    pub fn format_with_context(&self) -> String {
        let mut msg = self.to_string();

        if let Some(lines) = &self.location().context_lines {
            msg.push_str("\n\n");
            let error_line = self.location().line_number;
            for (number, line) in lines {
                let marker = if Some(*number) == error_line {
                    ">"
                } else {
                    " "
                };
                msg.push_str(&format!("{marker} {number:>4} | {line}\n"));
            }
        }

        if let TemplateError::VariableNotFound {
            available_variables,
            ..
        } = self
        {
            if !available_variables.is_empty() {
                msg.push_str("\nAvailable variables:\n");
                for var in available_variables.iter() {
                    msg.push_str(&format!("  - {var}\n"));
                }
            }
        }

        msg
    }
}
