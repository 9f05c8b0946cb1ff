//! Classify, dispatch, and fall back.

use std::sync::Arc;

use leadmcp_llm::GatewayError;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::collaborators::{ActorRunner, ClassifierGateway, LeadsStore};
use crate::error::DispatchError;
use crate::handlers::{leads, scrape, summarize};
use crate::prompts::{ASSISTANT_PROMPT, ROUTER_PROMPT};

/// Actor used for profile scraping unless overridden.
pub const DEFAULT_SCRAPE_ACTOR: &str = "apimaestro/linkedin-profile-detail";

/// One inbound message, whatever channel it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub channel: Option<String>,
}

impl IncomingMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Routes classified messages to exactly one handler.
///
/// Holds no per-request state; clone it freely or share it behind an `Arc`.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn ClassifierGateway>,
    leads: Arc<dyn LeadsStore>,
    actor: Arc<dyn ActorRunner>,
    scrape_actor_id: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("scrape_actor_id", &self.scrape_actor_id)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ClassifierGateway>,
        leads: Arc<dyn LeadsStore>,
        actor: Arc<dyn ActorRunner>,
    ) -> Self {
        Self {
            gateway,
            leads,
            actor,
            scrape_actor_id: DEFAULT_SCRAPE_ACTOR.to_owned(),
        }
    }

    /// Overrides the actor id used by `scrape`.
    #[must_use]
    pub fn with_scrape_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.scrape_actor_id = actor_id.into();
        self
    }

    /// Asks the gateway to classify `message` and parses its answer.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Gateway`] when the call fails, or
    /// [`DispatchError::Classification`] when the answer is not a descriptor.
    pub async fn classify(&self, message: &str) -> Result<Action, DispatchError> {
        let raw = self.gateway.ask(ROUTER_PROMPT, message).await?;
        tracing::debug!(raw = %raw, "classifier output");
        let action = Action::from_classifier_output(&raw)?;
        tracing::info!(action = action.name(), "message classified");
        Ok(action)
    }

    /// Runs the handler for `action`. `message` is the original user text,
    /// used by `chitchat`.
    ///
    /// # Errors
    ///
    /// Propagates gateway and store failures. Scrape failures are replies,
    /// not errors.
    pub async fn dispatch(&self, action: &Action, message: &str) -> Result<String, DispatchError> {
        let reply = match action {
            Action::GetLeads(query) => leads::get_leads(self.leads.as_ref(), query).await?,
            Action::Summarize { text } => summarize::summarize(self.gateway.as_ref(), text).await?,
            Action::Scrape { url } => {
                scrape::scrape(self.actor.as_ref(), &self.scrape_actor_id, url.as_deref()).await
            }
            Action::Chitchat => self.gateway.ask(ASSISTANT_PROMPT, message).await?,
            Action::Unknown(name) => format!("Unknown action: {name}"),
        };
        Ok(reply)
    }

    /// Full pipeline for one message.
    ///
    /// Any classification or handler failure is logged and answered by the
    /// plain assistant prompt instead.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] only when that last-resort call fails too.
    pub async fn handle_message(&self, incoming: &IncomingMessage) -> Result<String, GatewayError> {
        match self.route(&incoming.message).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::warn!(
                    user = incoming.user.as_deref().unwrap_or("-"),
                    channel = incoming.channel.as_deref().unwrap_or("-"),
                    error = %e,
                    "routing failed, answering as assistant"
                );
                self.gateway.ask(ASSISTANT_PROMPT, &incoming.message).await
            }
        }
    }

    async fn route(&self, message: &str) -> Result<String, DispatchError> {
        let action = self.classify(message).await?;
        self.dispatch(&action, message).await
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
