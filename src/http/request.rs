//! Invocation event extraction.
//!
//! # Responsibilities
//! - Deserialize the platform event (`requestContext.http.*`)
//! - Keep the method exactly as sent; the router decides whether it matches
//! - Recover the request id on a best-effort basis for error reports
//!
//! # Design Decisions
//! - Only the fields the router needs are read; everything else is ignored
//! - A missing or null `requestContext` is an extraction error, not a panic

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Header carrying the request id on the local server.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Errors raised while turning an event into a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed invocation event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The subset of the platform event the router reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub http: HttpContext,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpContext {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub source_ip: Option<String>,
}

impl InvocationEvent {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_context: RequestContext {
                http: HttpContext {
                    method: method.into(),
                    path: path.into(),
                    source_ip: None,
                },
                request_id: None,
            },
        }
    }

    pub fn with_source_ip(mut self, source_ip: impl Into<String>) -> Self {
        self.request_context.http.source_ip = Some(source_ip.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_context.request_id = Some(request_id.into());
        self
    }

    /// The event as the platform would deliver it.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "requestContext": {
                "http": {
                    "method": self.request_context.http.method,
                    "path": self.request_context.http.path,
                    "sourceIp": self.request_context.http.source_ip,
                },
                "requestId": self.request_context.request_id,
            }
        })
    }
}

/// A request extracted from one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Raw method string, not case-folded.
    pub method: String,
    pub path: String,
    pub source_ip: Option<String>,
    pub request_id: Option<String>,
}

impl InvocationRequest {
    /// Extract a request from a raw event.
    pub fn from_event(event: Value) -> Result<Self, RequestError> {
        let event: InvocationEvent = serde_json::from_value(event)?;
        let RequestContext { http, request_id } = event.request_context;

        Ok(Self {
            method: http.method,
            path: http.path,
            source_ip: http.source_ip,
            request_id,
        })
    }
}

/// Read `requestContext.requestId` from an event that may be malformed.
pub fn request_id_hint(event: &Value) -> Option<String> {
    event
        .pointer("/requestContext/requestId")
        .and_then(Value::as_str)
        .map(str::to_string)
}
