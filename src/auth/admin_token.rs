//! Shared-secret admin token check
//!
//! Every editor request presents the secret in `X-Admin-Token`. The check
//! runs first in each handler, before any request body is interpreted or any
//! outbound call is made.

use hyper::HeaderMap;

/// Header carrying the admin secret
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Validator holding the server-side secret
#[derive(Debug, Clone)]
pub struct AdminTokenValidator {
    secret: Option<String>,
}

impl AdminTokenValidator {
    /// Create a validator; an empty secret counts as unset
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Whether a secret is configured at all
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a presented token against the secret
    pub fn validate(&self, presented: Option<&str>) -> bool {
        verify_admin_token(presented, self.secret.as_deref())
    }

    /// Extract the token from request headers
    pub fn extract_from_headers(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    }
}

/// Pure verdict on (presented token, configured secret)
///
/// Fails when either side is missing or empty, so an unset secret locks the
/// editor instead of opening it.
pub fn verify_admin_token(presented: Option<&str>, secret: Option<&str>) -> bool {
    match (presented, secret) {
        (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
            constant_time_compare(token, secret)
        }
        _ => false,
    }
}

/// Constant-time string comparison to prevent timing attacks
///
/// Only the length is allowed to leak.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
