use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use leadmcp_router::{Dispatcher, IncomingMessage};
use serde_json::json;

use super::{AppState, ErrorBody};
use crate::slack::{signature, Envelope, SlackClient};

/// Posted when routing fails outright or the first reply could not be sent.
pub(crate) const APOLOGY: &str = "Sorry, something went wrong while processing your message.";

/// `POST /slack/events`: verify, acknowledge, answer in the background.
///
/// Slack expects an acknowledgement within three seconds, so routing runs on a
/// spawned task and the reply is posted with `chat.postMessage`.
pub(super) async fn slack_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = state.slack_signing_secret.as_deref() {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        if let Err(e) = signature::verify(
            secret,
            header("x-slack-request-timestamp"),
            header("x-slack-signature"),
            &body,
            chrono::Utc::now().timestamp(),
        ) {
            tracing::warn!(error = %e, "rejected Slack request");
            return (StatusCode::UNAUTHORIZED, ErrorBody::new("invalid signature")).into_response();
        }
    }

    let envelope: Envelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable Slack payload");
            return (StatusCode::BAD_REQUEST, ErrorBody::new("invalid Slack payload"))
                .into_response();
        }
    };

    match envelope {
        Envelope::UrlVerification { challenge } => {
            tracing::info!("answering Slack URL verification");
            Json(json!({ "challenge": challenge })).into_response()
        }
        Envelope::EventCallback { event } => {
            if let Some(retry) = headers.get("x-slack-retry-num") {
                tracing::info!(retry = ?retry, kind = %event.kind, "ignoring Slack retry");
                return ack();
            }
            let Some(incoming) = event.to_incoming() else {
                tracing::debug!(kind = %event.kind, "ignoring Slack event");
                return ack();
            };
            match state.slack.clone() {
                Some(slack) => {
                    state.tasks.spawn(answer_in_slack(
                        Arc::clone(&state.dispatcher),
                        slack,
                        incoming,
                    ));
                }
                None => tracing::warn!("SLACK_BOT_TOKEN not set; Slack event left unanswered"),
            }
            ack()
        }
        Envelope::Other => ack(),
    }
}

fn ack() -> Response {
    Json(json!({ "ok": true })).into_response()
}

async fn answer_in_slack(dispatcher: Arc<Dispatcher>, slack: SlackClient, incoming: IncomingMessage) {
    let Some(channel) = incoming.channel.clone() else {
        return;
    };
    tracing::info!(
        user = incoming.user.as_deref().unwrap_or("-"),
        channel = %channel,
        "handling Slack message"
    );

    let reply = match dispatcher.handle_message(&incoming).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(channel = %channel, error = %e, "fallback answer failed");
            APOLOGY.to_owned()
        }
    };

    let Err(e) = slack.post_message(&channel, &reply).await else {
        return;
    };
    tracing::warn!(channel = %channel, error = %e, "posting Slack reply failed");
    if reply != APOLOGY {
        if let Err(e) = slack.post_message(&channel, APOLOGY).await {
            tracing::error!(channel = %channel, error = %e, "posting Slack apology failed");
        }
    }
}
