// ABOUTME: Event value type carried through helper dispatch
// ABOUTME: Holds a payload subscribers may rewrite and a stop flag that short-circuits dispatch

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    name: Option<String>,
    data: Value,
    stopped: bool,
}

impl Event {
    pub fn new(name: Option<String>, data: Value) -> Self {
        Self {
            name,
            data,
            stopped: false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The payload. Starts as whatever the trigger site supplied; subscribers
    /// overwrite it to return a result to the caller.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Settable before dispatch; a stopped event does not travel past the
    /// subscriber currently holding it.
    pub fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }
}
