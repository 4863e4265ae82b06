//! Response envelope construction.
//!
//! # Responsibilities
//! - Serialize structured bodies to compact JSON text
//! - Pass text bodies through verbatim
//! - Merge the security header set with the caller's content type
//!
//! # Design Decisions
//! - The envelope is what the platform expects: `{ statusCode, headers, body }`
//!   with the body always a string
//! - Building a response cannot fail

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::security::SecurityHeaders;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain";

/// Response body before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

impl ResponseBody {
    pub fn empty() -> Self {
        ResponseBody::Text(String::new())
    }

    fn into_string(self) -> String {
        match self {
            ResponseBody::Text(text) => text,
            ResponseBody::Json(value) => value.to_string(),
        }
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        ResponseBody::Text(text.to_string())
    }
}

impl From<String> for ResponseBody {
    fn from(text: String) -> Self {
        ResponseBody::Text(text)
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        ResponseBody::Json(value)
    }
}

/// The response envelope returned to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Builds envelopes carrying the security header set.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    headers: SecurityHeaders,
}

impl ResponseBuilder {
    pub fn new(headers: SecurityHeaders) -> Self {
        Self { headers }
    }

    /// Build a response with an `application/json` content type.
    pub fn build(&self, status: StatusCode, body: impl Into<ResponseBody>) -> ApiResponse {
        self.build_with_content_type(status, body, APPLICATION_JSON)
    }

    pub fn build_with_content_type(
        &self,
        status: StatusCode,
        body: impl Into<ResponseBody>,
        content_type: &str,
    ) -> ApiResponse {
        ApiResponse {
            status_code: status.as_u16(),
            headers: self.headers.with_content_type(content_type),
            body: body.into().into_string(),
        }
    }
}
