//! Slack Events API payloads.

use std::sync::LazyLock;

use leadmcp_router::IncomingMessage;
use regex::Regex;
use serde::Deserialize;

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@[UW][A-Z0-9]+>").expect("valid regex"));

/// Outer envelope posted to the events endpoint.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    UrlVerification { challenge: String },
    EventCallback { event: Event },
    #[serde(other)]
    Other,
}

/// Inner event. Only the fields the router needs are kept.
#[derive(Debug, Default, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub channel_type: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Event {
    /// The message to route, if this event is one we answer.
    ///
    /// Bot mentions are answered with the mention markup removed. Direct
    /// messages from humans are answered as-is. Edits, joins, bot posts and
    /// everything else yield `None`, as does an empty remaining text.
    #[must_use]
    pub fn to_incoming(&self) -> Option<IncomingMessage> {
        let channel = self.channel.clone()?;
        let text = self.text.as_deref().unwrap_or_default();

        let message = match self.kind.as_str() {
            "app_mention" => strip_mentions(text),
            "message"
                if self.channel_type.as_deref() == Some("im")
                    && self.bot_id.is_none()
                    && self.subtype.is_none() =>
            {
                text.trim().to_owned()
            }
            _ => return None,
        };
        if message.is_empty() {
            return None;
        }

        Some(IncomingMessage {
            user: self.user.clone(),
            message,
            channel: Some(channel),
        })
    }
}

/// Removes `<@U…>` / `<@W…>` user mentions and trims the result.
#[must_use]
pub fn strip_mentions(text: &str) -> String {
    MENTION.replace_all(text, "").trim().to_owned()
}
