//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo; one task per connection. Request bodies
//! are collected up front and handed to `route`, which holds all routing and
//! can be driven directly in tests.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::auth::AdminTokenValidator;
use crate::config::Args;
use crate::content::{ContentGateway, GitHubStore};
use crate::editor::translator::TranslatorSettings;
use crate::editor::{EditTranslator, OpenAiBackend};
use crate::routes;
use crate::types::{GatewayError, Result};

/// Shared application state
///
/// Immutable after startup; requests share nothing else.
pub struct AppState {
    pub args: Args,
    pub admin: AdminTokenValidator,
    /// Absent while GITHUB_TOKEN is unset
    pub content: Option<ContentGateway>,
    /// Absent while OPENAI_API_KEY is unset
    pub translator: Option<EditTranslator>,
}

impl AppState {
    /// Create AppState with the real GitHub and completion clients
    pub fn new(args: Args) -> Result<Self> {
        let timeout = args.upstream_timeout();

        let content = match args.github.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => {
                let store = GitHubStore::new(args.repo_api_url(), &args.github.branch, token, timeout)?;
                Some(ContentGateway::new(Arc::new(store)))
            }
            None => None,
        };

        let translator = match args.openai.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let backend =
                    OpenAiBackend::new(&args.openai.base_url, &args.openai.model, key, timeout)?;
                Some(EditTranslator::new(
                    Arc::new(backend),
                    TranslatorSettings {
                        temperature: args.openai.temperature,
                        max_tokens: args.openai.max_tokens,
                    },
                ))
            }
            None => None,
        };

        Ok(Self::with_services(args, content, translator))
    }

    /// Create AppState around already-built services
    pub fn with_services(
        args: Args,
        content: Option<ContentGateway>,
        translator: Option<EditTranslator>,
    ) -> Self {
        let admin = AdminTokenValidator::new(args.admin_secret.clone());
        Self {
            args,
            admin,
            content,
            translator,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Gatehouse listening on {}", state.args.listen);

    if state.content.is_none() {
        warn!("GITHUB_TOKEN not set - /api/github will answer 500");
    }
    if state.translator.is_none() {
        warn!("OPENAI_API_KEY not set - /api/prompt will answer 500");
    }
    if !state.admin.is_configured() {
        warn!("ADMIN_SECRET not set - every editor request will be rejected");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Collect the body and hand the request to `route`
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, hyper::Error> {
    let span = info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.uri().path()
    );

    async move {
        info!("[{}] {} {}", addr, req.method(), req.uri().path());

        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("Request body error: {}", e);
                return Ok(routes::error_response(
                    GatewayError::BadRequest("Failed to read request body".to_string()),
                    "GET, POST, OPTIONS",
                ));
            }
        };

        let response = route(state, Request::from_parts(parts, body)).await;
        info!(status = response.status().as_u16(), "Request completed");
        Ok(response)
    }
    .instrument(span)
    .await
}

/// Route a request with a fully read body
pub async fn route(state: Arc<AppState>, req: Request<Bytes>) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();

    match (req.method().clone(), path.as_str()) {
        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(&state),
        (_, routes::github::PATH) => routes::handle_github_request(&state, req).await,
        (_, routes::prompt::PATH) => routes::handle_prompt_request(&state, req).await,
        _ => routes::error_response(GatewayError::NotFound(path.clone()), "GET, POST, OPTIONS"),
    }
}
