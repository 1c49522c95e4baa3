//! Edit Instruction Translator route
//!
//! - `POST /api/prompt` `{prompt, fileContent, fileName}` →
//!   `{updatedContent, model, usage}`

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response, StatusCode};

use super::{authorize, error_response, json_response, parse_json_body, preflight_response};
use crate::editor::EditRequest;
use crate::server::AppState;
use crate::types::{GatewayError, Result};

pub const PATH: &str = "/api/prompt";

const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Handle a request to the translator
pub async fn handle_prompt_request(state: &AppState, req: Request<Bytes>) -> Response<Full<Bytes>> {
    match dispatch(state, req).await {
        Ok(response) => response,
        Err(err) => error_response(err, ALLOW_METHODS),
    }
}

async fn dispatch(state: &AppState, req: Request<Bytes>) -> Result<Response<Full<Bytes>>> {
    if req.method() == Method::OPTIONS {
        return Ok(preflight_response(ALLOW_METHODS));
    }
    if req.method() != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    authorize(&state.admin, req.headers())?;

    let translator = state.translator.as_ref().ok_or_else(|| {
        GatewayError::Config(
            "OPENAI_API_KEY not configured. The chat feature requires a completion service API key."
                .to_string(),
        )
    })?;

    let request: EditRequest = parse_json_body(req.body())?;
    let result = translator.translate(&request).await?;
    Ok(json_response(StatusCode::OK, &result, ALLOW_METHODS))
}
