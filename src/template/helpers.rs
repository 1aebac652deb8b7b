// ABOUTME: Handlebars helper functions available inside view templates
// ABOUTME: Implements built-in formatting helpers and the bridge to event-dispatched view helpers

use chrono::{DateTime, TimeZone, Utc};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;

use crate::events::{helper_event_name, Event, EventDispatch};
use crate::view::is_truthy;

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires a string parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires a string parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Default helper - falls back when the value reads as absent or empty,
/// under the same rule the view's variable lookup uses.
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).map(|v| v.value().clone()).unwrap_or(Value::Null);

    let fallback = h
        .param(1)
        .ok_or_else(|| RenderError::new("default helper requires a fallback parameter"))?;

    if is_truthy(&value) {
        write_value(out, &value)
    } else {
        write_value(out, fallback.value())
    }
}

/// Date formatting helper - accepts an RFC 3339 string or epoch seconds,
/// with an optional strftime format parameter.
pub fn format_date_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h
        .param(0)
        .ok_or_else(|| RenderError::new("format_date helper requires a date parameter"))?;

    let format = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    let datetime: DateTime<Utc> = match value.value() {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RenderError::new(format!("Failed to parse date: {}", e)))?,
        Value::Number(n) => n
            .as_i64()
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
            .ok_or_else(|| RenderError::new("Failed to parse date: invalid epoch seconds"))?,
        _ => {
            return Err(RenderError::new(
                "format_date helper requires a string or epoch-seconds parameter",
            ))
        }
    };

    out.write(&datetime.format(format).to_string())?;
    Ok(())
}

/// Environment variable helper with an optional default value
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("env helper requires a variable name parameter"))?;

    let default_value = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    let value = env::var(var_name).unwrap_or_else(|_| default_value.to_string());
    out.write(&value)?;
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("format_date", Box::new(format_date_helper));
    handlebars.register_helper("env", Box::new(env_helper));
}

/// Register the `helper` bridge, letting templates call view helpers that
/// live behind the event dispatch: `{{helper "format_price" amount}}`.
/// Dispatch follows the same contract as `View::call_helper`.
pub fn register_helper_bridge(handlebars: &mut Handlebars, dispatch: Arc<dyn EventDispatch>) {
    handlebars.register_helper(
        "helper",
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  _: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> std::result::Result<(), RenderError> {
                let name = h
                    .param(0)
                    .and_then(|v| v.value().as_str())
                    .ok_or_else(|| RenderError::new("helper requires a helper name parameter"))?;

                let event_name = helper_event_name(name);
                if !dispatch.has_subscribers(&event_name) {
                    return Err(RenderError::new(format!(
                        "The method \"{}()\" is unsupported.",
                        name
                    )));
                }

                let arguments: Vec<Value> =
                    h.params().iter().skip(1).map(|p| p.value().clone()).collect();

                let mut event = Event::new(
                    Some(event_name.clone()),
                    json!({ "arguments": arguments }),
                );
                // Only the first subscriber's result is used.
                event.set_stopped(true);
                dispatch.trigger(&event_name, &mut event);

                write_value(out, event.data())
            },
        ),
    );
}

fn write_value(out: &mut dyn Output, value: &Value) -> std::result::Result<(), RenderError> {
    match value {
        Value::String(s) => out.write(s)?,
        Value::Null => {}
        other => out.write(&other.to_string())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventManager;
    use handlebars::Handlebars;
    use serde_json::json;

    fn create_test_handlebars() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut handlebars);
        handlebars
    }

    #[test]
    fn test_case_helpers() {
        let handlebars = create_test_handlebars();

        let upper = handlebars
            .render_template("{{upper \"hello\"}}", &json!({}))
            .unwrap();
        assert_eq!(upper, "HELLO");

        let lower = handlebars
            .render_template("{{lower \"HELLO\"}}", &json!({}))
            .unwrap();
        assert_eq!(lower, "hello");
    }

    #[test]
    fn test_default_helper_falls_back_on_empty_values() {
        let handlebars = create_test_handlebars();
        let context = json!({"empty": "", "zero": 0, "name": "set"});

        let result = handlebars
            .render_template("{{default empty \"fallback\"}}", &context)
            .unwrap();
        assert_eq!(result, "fallback");

        let result = handlebars
            .render_template("{{default zero \"fallback\"}}", &context)
            .unwrap();
        assert_eq!(result, "fallback");

        let result = handlebars
            .render_template("{{default missing \"fallback\"}}", &context)
            .unwrap();
        assert_eq!(result, "fallback");

        let result = handlebars
            .render_template("{{default name \"fallback\"}}", &context)
            .unwrap();
        assert_eq!(result, "set");
    }

    #[test]
    fn test_format_date_helper() {
        let handlebars = create_test_handlebars();
        let context = json!({"published": "2024-03-01T12:30:00Z"});

        let result = handlebars
            .render_template("{{format_date published \"%Y-%m-%d\"}}", &context)
            .unwrap();
        assert_eq!(result, "2024-03-01");

        let result = handlebars
            .render_template("{{format_date 0 \"%Y\"}}", &json!({}))
            .unwrap();
        assert_eq!(result, "1970");

        let result = handlebars.render_template("{{format_date \"not a date\"}}", &json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_helper() {
        std::env::set_var("VIEWLET_TEST_VAR", "test_value");
        let handlebars = create_test_handlebars();

        let result = handlebars
            .render_template("{{env \"VIEWLET_TEST_VAR\"}}", &json!({}))
            .unwrap();
        assert_eq!(result, "test_value");

        let result = handlebars
            .render_template("{{env \"VIEWLET_MISSING_VAR\" \"fallback\"}}", &json!({}))
            .unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_helper_bridge_dispatches_to_subscriber() {
        let mut manager = EventManager::new();
        manager.subscribe("view.call.helper.shout", |event| {
            let text = event.data()["arguments"][0].as_str().unwrap_or("").to_uppercase();
            event.set_data(json!(format!("{}!", text)));
        });

        let mut handlebars = create_test_handlebars();
        register_helper_bridge(&mut handlebars, Arc::new(manager));

        let result = handlebars
            .render_template("{{helper \"shout\" name}}", &json!({"name": "hi"}))
            .unwrap();
        assert_eq!(result, "HI!");
    }

    #[test]
    fn test_helper_bridge_without_subscriber_fails() {
        let mut handlebars = create_test_handlebars();
        register_helper_bridge(&mut handlebars, Arc::new(EventManager::new()));

        let result = handlebars.render_template("{{helper \"missing\"}}", &json!({}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("The method \"missing()\" is unsupported."));
    }
}
