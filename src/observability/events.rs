//! Observable events
//!
//! Events are explicit and typed; the logger only ever sees their string
//! form.

use std::fmt;

use super::logger::Severity;

/// Observable events in the movies service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved from defaults, file, environment and flags
    ConfigLoaded,
    /// Seed dataset parsed and validated
    SeedLoaded,
    /// Listener bound, serving requests
    ServerListening,
    /// Startup failed
    BootFailed,
    /// Shutdown signal received
    ShutdownStart,
    /// Listener closed
    ShutdownComplete,

    // Requests
    /// A request finished (any status)
    RequestCompleted,
    /// A payload failed schema validation
    ValidationRejected,

    // Mutations
    MovieCreated,
    MovieUpdated,
    MovieDeleted,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "MOVIES_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SeedLoaded => "SEED_LOADED",
            Event::ServerListening => "MOVIES_SERVING",
            Event::BootFailed => "MOVIES_STARTUP_FAILED",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::RequestCompleted => "REQUEST_COMPLETE",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::MovieCreated => "MOVIE_CREATED",
            Event::MovieUpdated => "MOVIE_UPDATED",
            Event::MovieDeleted => "MOVIE_DELETED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::ValidationRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
