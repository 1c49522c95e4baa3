//! Error types for Gatehouse
//!
//! Every failure a handler can produce maps to one HTTP status and a JSON
//! body with an `error` field, so the editor UI can show it verbatim.

use hyper::StatusCode;
use serde_json::{json, Value};

/// Main error type for Gatehouse operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A remote (GitHub or the completion service) answered with a failure status
    #[error("{message} (HTTP {status})")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// The model refused the edit with its own `{"error": ...}` object
    #[error("{0}")]
    Rejected(String),

    #[error("AI returned invalid output. Please try rephrasing your request.")]
    InvalidOutput,

    #[error("{0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::InvalidOutput => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the browser
    pub fn to_json(&self) -> Value {
        match self {
            Self::NotFound(path) => json!({ "error": "Not Found", "path": path }),
            Self::Upstream {
                message,
                details: Some(details),
                ..
            } => json!({ "error": message, "details": details }),
            Self::Upstream { message, .. } => json!({ "error": message }),
            Self::Internal(message) => json!({ "error": "Server error", "message": message }),
            other => json!({ "error": other.to_string() }),
        }
    }

    /// Convert to status code and body tuple for HTTP response
    pub fn into_status_code_and_body(self) -> (StatusCode, String) {
        (self.status_code(), self.to_json().to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("Invalid JSON body: {}", err))
    }
}

/// Result type alias for Gatehouse operations
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            GatewayError::Forbidden("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::Rejected("risky".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GatewayError::InvalidOutput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::Config("missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = GatewayError::Upstream {
            status: 409,
            message: "Failed to commit".into(),
            details: None,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let weird = GatewayError::Upstream {
            status: 42,
            message: "odd".into(),
            details: None,
        };
        assert_eq!(weird.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_json_bodies() {
        assert_eq!(
            GatewayError::Unauthorized.to_json(),
            json!({ "error": "Unauthorized" })
        );

        let upstream = GatewayError::Upstream {
            status: 422,
            message: "Failed to commit".into(),
            details: Some(json!({ "message": "sha wasn't supplied" })),
        };
        assert_eq!(
            upstream.to_json(),
            json!({
                "error": "Failed to commit",
                "details": { "message": "sha wasn't supplied" }
            })
        );

        assert_eq!(
            GatewayError::Internal("boom".into()).to_json(),
            json!({ "error": "Server error", "message": "boom" })
        );

        assert_eq!(
            GatewayError::InvalidOutput.to_json()["error"],
            "AI returned invalid output. Please try rephrasing your request."
        );
    }
}
