//! HTTP routes for Gatehouse

pub mod github;
pub mod health;
pub mod prompt;

pub use github::handle_github_request;
pub use health::health_check;
pub use prompt::handle_prompt_request;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use serde::Serialize;

use crate::auth::AdminTokenValidator;
use crate::types::{GatewayError, Result};

/// Headers browsers may send on editor requests
const ALLOWED_HEADERS: &str = "Content-Type, X-Admin-Token";

/// Build a JSON response with the route's CORS headers
pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    allow_methods: &'static str,
) -> Response<Full<Bytes>> {
    let body = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(
                GatewayError::Internal(format!("Serialization failed: {}", e)),
                allow_methods,
            )
        }
    };

    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(response, allow_methods)
}

/// Build the JSON error response for a gateway error
pub(crate) fn error_response(err: GatewayError, allow_methods: &'static str) -> Response<Full<Bytes>> {
    let (status, body) = err.into_status_code_and_body();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(response, allow_methods)
}

/// CORS preflight response
pub(crate) fn preflight_response(allow_methods: &'static str) -> Response<Full<Bytes>> {
    with_cors(Response::new(Full::new(Bytes::new())), allow_methods)
}

fn with_cors(mut response: Response<Full<Bytes>>, allow_methods: &'static str) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(allow_methods),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Check the admin token before anything else is looked at
pub(crate) fn authorize(validator: &AdminTokenValidator, headers: &HeaderMap) -> Result<()> {
    if validator.validate(AdminTokenValidator::extract_from_headers(headers)) {
        Ok(())
    } else {
        Err(GatewayError::Unauthorized)
    }
}

/// Parse a JSON request body; an empty body reads as `{}`
pub(crate) fn parse_json_body<T>(body: &Bytes) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(body)?)
}
