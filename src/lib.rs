// ABOUTME: Main library module for the viewlet view layer
// ABOUTME: Exports all core modules and provides the public API

pub mod events;
pub mod template;
pub mod view;

// Re-export commonly used types
pub use events::{Event, EventDispatch, EventManager, HELPER_EVENT_PREFIX};
pub use template::{HandlebarsEngine, RenderScope, TemplateEngine, TemplateError};
pub use view::{View, ViewError};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
