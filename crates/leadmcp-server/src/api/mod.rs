mod mcp;
mod slack;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use leadmcp_router::Dispatcher;
use serde::Serialize;
use tokio_util::task::TaskTracker;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState,
};
use crate::slack::SlackClient;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// `None` when `SLACK_BOT_TOKEN` is unset; events are then acknowledged
    /// but not answered.
    pub slack: Option<SlackClient>,
    /// `None` disables signature verification on `/slack/events`.
    pub slack_signing_secret: Option<Arc<str>>,
    /// Background Slack answers; drained on shutdown.
    pub tasks: TaskTracker,
}

/// `{"error": "..."}` body shared by handlers and middleware.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

/// `/mcp`: bearer auth, then the shared rate limit.
fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new().route("/mcp", post(mcp::handle_mcp)).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth,
                require_bearer_auth,
            ))
            .layer(axum::middleware::from_fn_with_state(
                rate_limit,
                enforce_rate_limit,
            )),
    )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    // Slack authenticates with request signatures, not bearer tokens.
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/slack/events", post(slack::slack_events));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "MCP server is running"
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(60, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
