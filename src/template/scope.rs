// ABOUTME: Render scope handed to template engines
// ABOUTME: Exposes view variables, previously rendered content, and the helper dispatch handle

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::events::EventDispatch;

/// The evaluation environment for one render pass: the view's variables, the
/// already-rendered content when a layout wraps it, and the event dispatch
/// handle when the view has one attached.
#[derive(Clone)]
pub struct RenderScope<'a> {
    variables: &'a HashMap<String, Value>,
    content: Option<&'a str>,
    helpers: Option<Arc<dyn EventDispatch>>,
}

impl<'a> RenderScope<'a> {
    pub fn new(variables: &'a HashMap<String, Value>) -> Self {
        Self {
            variables,
            content: None,
            helpers: None,
        }
    }

    pub fn with_content(mut self, content: &'a str) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_helpers(mut self, helpers: Arc<dyn EventDispatch>) -> Self {
        self.helpers = Some(helpers);
        self
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        self.variables
    }

    pub fn content(&self) -> Option<&str> {
        self.content
    }

    pub fn helpers(&self) -> Option<&Arc<dyn EventDispatch>> {
        self.helpers.as_ref()
    }

    /// Root context for rendering: every variable is a top-level key, and the
    /// wrapped content appears under `content` on the layout pass.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();

        for (key, value) in self.variables {
            root.insert(key.clone(), value.clone());
        }

        if let Some(content) = self.content {
            root.insert("content".to_string(), Value::String(content.to_string()));
        }

        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_exposes_variables_at_top_level() {
        let mut variables = HashMap::new();
        variables.insert("title".to_string(), json!("Home"));
        variables.insert("count".to_string(), json!(3));

        let scope = RenderScope::new(&variables);
        let context = scope.to_json();

        assert_eq!(context["title"], "Home");
        assert_eq!(context["count"], 3);
        assert!(context.get("content").is_none());
    }

    #[test]
    fn test_layout_pass_exposes_content() {
        let variables = HashMap::new();
        let scope = RenderScope::new(&variables).with_content("<p>body</p>");
        let context = scope.to_json();

        assert_eq!(context["content"], "<p>body</p>");
    }
}
