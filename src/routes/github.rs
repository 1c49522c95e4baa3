//! Content Store Gateway route
//!
//! - `GET  /api/github?file=<path>` - read a page with its revision token
//! - `POST /api/github` `{file, content, sha, message?}` - commit a page
//!
//! Checks run in a fixed order: preflight, store credential, admin token,
//! then the method-specific request rules.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response, StatusCode};

use super::{authorize, error_response, json_response, parse_json_body, preflight_response};
use crate::content::{allowlist, WriteRequest};
use crate::server::AppState;
use crate::types::{GatewayError, Result};

pub const PATH: &str = "/api/github";

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Handle a request to the content gateway
pub async fn handle_github_request(state: &AppState, req: Request<Bytes>) -> Response<Full<Bytes>> {
    match dispatch(state, req).await {
        Ok(response) => response,
        Err(err) => error_response(err, ALLOW_METHODS),
    }
}

async fn dispatch(state: &AppState, req: Request<Bytes>) -> Result<Response<Full<Bytes>>> {
    if req.method() == Method::OPTIONS {
        return Ok(preflight_response(ALLOW_METHODS));
    }

    let gateway = state.content.as_ref().ok_or_else(|| {
        GatewayError::Config("GITHUB_TOKEN not configured in the server environment.".to_string())
    })?;

    authorize(&state.admin, req.headers())?;

    match *req.method() {
        Method::GET => {
            let file = file_param(req.uri().query())?
                .ok_or_else(|| GatewayError::BadRequest("Missing file parameter".to_string()))?;

            let snapshot = gateway.read_file(&file).await?;
            Ok(json_response(StatusCode::OK, &snapshot, ALLOW_METHODS))
        }
        Method::POST => {
            let request: WriteRequest = parse_json_body(req.body())?;
            let receipt = gateway.write_file(request).await?;
            Ok(json_response(StatusCode::OK, &receipt, ALLOW_METHODS))
        }
        _ => Err(GatewayError::MethodNotAllowed),
    }
}

/// The `file` query value, if present and non-empty
///
/// A repeated `file` names no single page and is refused like any other
/// path outside the allow-list.
fn file_param(query: Option<&str>) -> Result<Option<String>> {
    let pairs: Vec<(String, String)> = match query {
        Some(q) => serde_urlencoded::from_str(q)
            .map_err(|e| GatewayError::BadRequest(format!("Invalid query string: {}", e)))?,
        None => Vec::new(),
    };

    let mut files: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| key == "file")
        .map(|(_, value)| value)
        .collect();

    if files.len() > 1 {
        return Err(GatewayError::Forbidden(allowlist::NOT_ALLOWED.to_string()));
    }
    Ok(files.pop().filter(|f| !f.is_empty()))
}
