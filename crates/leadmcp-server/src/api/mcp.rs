use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use leadmcp_router::IncomingMessage;
use serde::Serialize;

use super::{AppState, ErrorBody};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
struct McpReply {
    reply: String,
}

/// `POST /mcp`: route one message and return the reply.
pub(super) async fn handle_mcp(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<IncomingMessage>, JsonRejection>,
) -> Response {
    let Json(incoming) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::info!(request_id = %req_id.0, error = %rejection, "rejected /mcp body");
            return (StatusCode::BAD_REQUEST, ErrorBody::new(rejection.body_text()))
                .into_response();
        }
    };

    if incoming.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("message must be a non-empty string"),
        )
            .into_response();
    }

    tracing::info!(
        request_id = %req_id.0,
        user = incoming.user.as_deref().unwrap_or("-"),
        channel = incoming.channel.as_deref().unwrap_or("-"),
        "handling /mcp message"
    );

    match state.dispatcher.handle_message(&incoming).await {
        Ok(reply) => Json(McpReply { reply }).into_response(),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "fallback answer failed");
            (StatusCode::BAD_GATEWAY, ErrorBody::new("MCP failed")).into_response()
        }
    }
}
