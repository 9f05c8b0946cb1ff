//! Seams between the routing core and the outside world.
//!
//! The dispatcher only ever talks to these traits. Production wiring uses the
//! HTTP clients from the sibling crates; tests substitute in-memory fakes.

use async_trait::async_trait;
use leadmcp_apify::{ActorError, ApifyClient};
use leadmcp_leads::{Lead, LeadQuery, StoreError, SupabaseClient};
use leadmcp_llm::{GatewayError, OpenAiClient};
use serde_json::Value;

/// Sends one system prompt plus one user message to an LLM and returns its text.
#[async_trait]
pub trait ClassifierGateway: Send + Sync {
    async fn ask(&self, system_prompt: &str, user_message: &str) -> Result<String, GatewayError>;
}

/// Read-only query over qualified leads.
#[async_trait]
pub trait LeadsStore: Send + Sync {
    async fn query_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, StoreError>;
}

/// Runs a remote scraping actor to completion and returns its output.
#[async_trait]
pub trait ActorRunner: Send + Sync {
    async fn run(&self, actor_id: &str, input: Value) -> Result<Value, ActorError>;
}

#[async_trait]
impl ClassifierGateway for OpenAiClient {
    async fn ask(&self, system_prompt: &str, user_message: &str) -> Result<String, GatewayError> {
        OpenAiClient::ask(self, system_prompt, user_message).await
    }
}

#[async_trait]
impl LeadsStore for SupabaseClient {
    async fn query_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, StoreError> {
        SupabaseClient::query_leads(self, query).await
    }
}

#[async_trait]
impl ActorRunner for ApifyClient {
    async fn run(&self, actor_id: &str, input: Value) -> Result<Value, ActorError> {
        self.run_actor(actor_id, &input).await
    }
}
