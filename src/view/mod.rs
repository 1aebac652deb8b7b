// ABOUTME: Server-side view object holding variables, template and layout paths
// ABOUTME: Renders through a pluggable template engine and proxies helper calls to event subscribers

pub mod error;

pub use error::{Result, ViewError};

use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::events::{helper_event_name, Event, EventDispatch};
use crate::template::{HandlebarsEngine, RenderScope, TemplateEngine};

/// A per-request view: a variables map fixed at construction, a template file
/// path, an optional layout wrapper, and a handle to the event collaborator
/// that hosts externally registered view helpers.
pub struct View {
    variables: HashMap<String, Value>,
    template_path: Option<PathBuf>,
    layout_path: Option<PathBuf>,
    content: Option<String>,
    event_manager: Option<Arc<dyn EventDispatch>>,
    engine: Box<dyn TemplateEngine>,
}

impl View {
    /// Create a view over the given variables. Paths are not validated here;
    /// an unset template path only fails once rendering is attempted.
    pub fn new(variables: HashMap<String, Value>) -> Self {
        Self {
            variables,
            template_path: None,
            layout_path: None,
            content: None,
            event_manager: None,
            engine: Box::new(HandlebarsEngine::new()),
        }
    }

    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    pub fn with_layout_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout_path = Some(path.into());
        self
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    /// Look up a variable the way templates see it: a key that is absent, or
    /// present with an empty/falsy value, reads as `None`.
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).filter(|value| is_truthy(value))
    }

    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    pub fn set_template_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.template_path = Some(path.into());
        self
    }

    pub fn layout_path(&self) -> Option<&Path> {
        self.layout_path.as_deref()
    }

    pub fn set_layout_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.layout_path = Some(path.into());
        self
    }

    pub fn event_manager(&self) -> Option<&Arc<dyn EventDispatch>> {
        self.event_manager.as_ref()
    }

    pub fn set_event_manager(&mut self, manager: Arc<dyn EventDispatch>) -> &mut Self {
        self.event_manager = Some(manager);
        self
    }

    /// Swap the template engine. The default is `HandlebarsEngine`.
    pub fn set_engine(&mut self, engine: Box<dyn TemplateEngine>) -> &mut Self {
        self.engine = engine;
        self
    }

    /// Proxy a helper call to the event collaborator. The call reaches the
    /// first subscriber registered for the derived event name and returns the
    /// data that subscriber left on the event.
    pub fn call_helper(&self, name: &str, arguments: Vec<Value>) -> Result<Value> {
        let event_name = helper_event_name(name);

        let manager = self
            .event_manager
            .as_ref()
            .filter(|manager| manager.has_subscribers(&event_name))
            .ok_or_else(|| ViewError::UnsupportedHelper {
                name: name.to_string(),
            })?;

        debug!(%event_name, "dispatching view helper call");

        let mut event = Event::new(Some(event_name.clone()), json!({ "arguments": arguments }));
        // Only the first subscriber's result is used.
        event.set_stopped(true);
        manager.trigger(&event_name, &mut event);

        Ok(event.into_data())
    }

    /// Render the template, then the layout when one is set. The layout pass
    /// sees the template's output as `content` in its scope. A template that
    /// emits nothing renders to the empty string.
    pub fn render(&mut self) -> Result<String> {
        let template_path = self
            .template_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(ViewError::EmptyTemplatePath)?;

        debug!(
            path = %template_path.display(),
            variables = self.variables.len(),
            "rendering template"
        );

        let mut scope = RenderScope::new(&self.variables);
        if let Some(manager) = &self.event_manager {
            scope = scope.with_helpers(Arc::clone(manager));
        }

        let rendered = self.engine.render_file(template_path, &scope)?;

        let rendered = match self.layout_path.as_deref() {
            Some(layout_path) if !layout_path.as_os_str().is_empty() => {
                debug!(path = %layout_path.display(), "rendering layout");
                let layout_scope = scope.clone().with_content(&rendered);
                self.engine.render_file(layout_path, &layout_scope)?
            }
            _ => rendered,
        };

        self.content = Some(rendered.clone());
        Ok(rendered)
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

/// The lookup rule shared by `View::get_variable` and the `default` template
/// helper: null, false, numeric zero, and empty strings, arrays, and objects
/// all read as absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
