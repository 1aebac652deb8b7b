// ABOUTME: Error types for template engine operations
// ABOUTME: Covers template file access, syntax, and render failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Template syntax error: {0}")]
    Syntax(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
