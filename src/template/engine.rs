// ABOUTME: Template engine contract and the default Handlebars-backed implementation
// ABOUTME: Renders template files against a view scope, capturing emitted text verbatim

use handlebars::Handlebars;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

use super::error::{Result, TemplateError};
use super::helpers;
use super::scope::RenderScope;

/// Evaluates a template unit against a view scope and returns everything it
/// emits. A template that emits nothing yields the empty string. Read and
/// evaluation failures surface as the implementation's own errors.
pub trait TemplateEngine: Send + Sync {
    fn render_file(&self, path: &Path, scope: &RenderScope) -> Result<String>;
}

#[derive(Clone)]
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Create an engine with all built-in helpers registered.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Emitted text is captured verbatim; escaping policy belongs to callers.
        handlebars.register_escape_fn(handlebars::no_escape);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Fail rendering on variables a template names but the scope lacks.
    pub fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.handlebars.set_strict_mode(enabled);
        self
    }

    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.handlebars.set_dev_mode(enabled);
        self
    }

    /// Render an inline template string against the scope.
    pub fn render_str(&self, template: &str, scope: &RenderScope) -> Result<String> {
        let context = scope.to_json();

        match scope.helpers() {
            Some(dispatch) => {
                // The helper bridge captures the dispatch handle, so it is
                // registered on a per-render copy of the registry.
                let mut registry = self.handlebars.clone();
                helpers::register_helper_bridge(&mut registry, Arc::clone(dispatch));
                Ok(registry.render_template(template, &context)?)
            }
            None => Ok(self.handlebars.render_template(template, &context)?),
        }
    }

    /// Check template syntax without rendering.
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::Syntax(e.to_string())),
        }
    }

    /// Register a custom helper function.
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render_file(&self, path: &Path, scope: &RenderScope) -> Result<String> {
        trace!(path = %path.display(), "reading template file");

        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.render_str(&source, scope)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}
