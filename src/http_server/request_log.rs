//! Request logging middleware
//!
//! Emits one `REQUEST_COMPLETE` line per request once the response is ready.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::{log_event_with_fields, Event, Logger};

pub async fn log_requests(request: Request, next: Next) -> Response {
    if !Logger::enabled(Event::RequestCompleted.severity()) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let latency_ms = started.elapsed().as_millis().to_string();
    log_event_with_fields(
        Event::RequestCompleted,
        &[
            ("method", method.as_str()),
            ("path", &path),
            ("status", response.status().as_str()),
            ("latency_ms", &latency_ms),
        ],
    );

    response
}
