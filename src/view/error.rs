// ABOUTME: Error types for view operations
// ABOUTME: Covers unsupported helper calls and missing template paths

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("The method \"{name}()\" is unsupported.")]
    UnsupportedHelper { name: String },

    #[error("Template file path is empty.")]
    EmptyTemplatePath,

    #[error(transparent)]
    Template(#[from] TemplateError),
}

pub type Result<T> = std::result::Result<T, ViewError>;
