// ABOUTME: Template engine module for the viewlet view layer
// ABOUTME: Provides the engine contract, render scopes, and built-in template helpers

pub mod engine;
pub mod error;
pub mod helpers;
pub mod scope;

pub use engine::{HandlebarsEngine, TemplateEngine};
pub use error::{Result, TemplateError};
pub use scope::RenderScope;
