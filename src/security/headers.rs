//! Security and CORS response headers.
//!
//! # Responsibilities
//! - Hold the fixed header set applied to every response
//! - Take the CORS allowed origin from configuration
//! - Merge the per-response content type into the set
//!
//! # Design Decisions
//! - Header names keep their conventional casing since the platform
//!   envelope is a plain string map
//! - Built once per process and shared read-only

use std::collections::BTreeMap;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
pub const FRAME_OPTIONS: &str = "X-Frame-Options";
pub const XSS_PROTECTION: &str = "X-XSS-Protection";
pub const STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
pub const REFERRER_POLICY: &str = "Referrer-Policy";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const CONTENT_TYPE: &str = "Content-Type";

/// The fixed header set, with a configurable allowed origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    allowed_origin: String,
}

impl SecurityHeaders {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    /// All fixed headers plus `Content-Type`.
    pub fn with_content_type(&self, content_type: &str) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.to_string(), self.allowed_origin.clone());
        for (name, value) in FIXED_HEADERS {
            headers.insert(name.to_string(), value.to_string());
        }
        headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
        headers
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new("*")
    }
}

const FIXED_HEADERS: [(&str, &str); 8] = [
    (ALLOW_METHODS, "GET, OPTIONS"),
    (ALLOW_HEADERS, "Content-Type, X-API-Key"),
    (CONTENT_TYPE_OPTIONS, "nosniff"),
    (FRAME_OPTIONS, "DENY"),
    (XSS_PROTECTION, "1; mode=block"),
    (STRICT_TRANSPORT_SECURITY, "max-age=31536000; includeSubDomains"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
];
