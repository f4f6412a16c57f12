//! Observability for the movies service
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and request events
//!
//! # Usage
//!
//! ```ignore
//! use movies_api::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::MovieCreated, &[("id", "5ad1a235-...")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{format_line, Logger, Severity};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
