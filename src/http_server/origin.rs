//! Cross-origin allow-list
//!
//! Exact-match check of the request's `Origin` header against a fixed list.
//! Only a listed origin is echoed back; everything else gets no allow header
//! and the browser enforces same-origin on its side.

use axum::http::header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use axum::http::{HeaderMap, HeaderValue};

/// Methods advertised in preflight responses
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

/// Outcome of checking one request's origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// No `Origin` header: same-origin or non-browser client, nothing to emit
    NoOrigin,
    /// Listed origin, echoed verbatim
    Allowed(String),
    /// Present but not listed
    Denied,
}

impl OriginDecision {
    /// Value for `Access-Control-Allow-Origin`, if one should be sent
    pub fn allow_header(&self) -> Option<&str> {
        match self {
            OriginDecision::Allowed(origin) => Some(origin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OriginGate {
    allowed: Vec<String>,
}

impl OriginGate {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        match origin {
            None => OriginDecision::NoOrigin,
            Some(origin) if self.allowed.iter().any(|a| a == origin) => {
                OriginDecision::Allowed(origin.to_string())
            }
            Some(_) => OriginDecision::Denied,
        }
    }

    /// Decide from request headers. A non-UTF-8 `Origin` cannot be listed.
    pub fn decide_headers(&self, headers: &HeaderMap) -> OriginDecision {
        match headers.get(ORIGIN) {
            None => OriginDecision::NoOrigin,
            Some(value) => match value.to_str() {
                Ok(origin) => self.decide(Some(origin)),
                Err(_) => OriginDecision::Denied,
            },
        }
    }

    /// Response headers for a simple (non-preflight) request
    pub fn response_headers(&self, request_headers: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(origin) = self.allow_origin_value(request_headers) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        }
        headers
    }

    /// Response headers for a preflight request
    pub fn preflight_headers(&self, request_headers: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(origin) = self.allow_origin_value(request_headers) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
        }
        headers
    }

    fn allow_origin_value(&self, request_headers: &HeaderMap) -> Option<HeaderValue> {
        let decision = self.decide_headers(request_headers);
        decision
            .allow_header()
            .and_then(|origin| HeaderValue::from_str(origin).ok())
    }
}
