//! Builds a [`Dispatcher`] backed by the production HTTP clients.

use std::sync::Arc;
use std::time::Duration;

use leadmcp_apify::{ApifyClient, PollPolicy};
use leadmcp_core::AppConfig;
use leadmcp_leads::SupabaseClient;
use leadmcp_llm::{OpenAiClient, OpenAiSettings};
use tokio_util::sync::CancellationToken;

use crate::dispatch::Dispatcher;
use crate::error::WiringError;

/// Per-request timeout for the leads store and each Apify API call.
const COLLABORATOR_TIMEOUT_SECS: u64 = 30;

/// Wires OpenAI, Supabase and Apify clients from `config`.
///
/// Cancelling `cancel` aborts any actor run still being polled.
///
/// # Errors
///
/// Returns [`WiringError`] if a client cannot be built, typically because a
/// configured base URL does not parse.
pub fn dispatcher_from_config(
    config: &AppConfig,
    cancel: CancellationToken,
) -> Result<Dispatcher, WiringError> {
    let gateway = OpenAiClient::with_base_url(
        &config.openai_api_key,
        &config.openai_base_url,
        OpenAiSettings {
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            timeout_secs: config.llm_request_timeout_secs,
            max_retries: config.llm_max_retries,
            backoff_base_ms: config.llm_retry_backoff_base_ms,
        },
    )?;

    let leads = SupabaseClient::new(
        &config.supabase_url,
        &config.supabase_anon_key,
        &config.supabase_leads_table,
        COLLABORATOR_TIMEOUT_SECS,
    )?;

    if config.apify_token.is_none() {
        tracing::warn!("APIFY_TOKEN not set; scrape requests will fail");
    }
    let actor = ApifyClient::with_base_url(
        config.apify_token.clone(),
        &config.apify_base_url,
        COLLABORATOR_TIMEOUT_SECS,
        PollPolicy {
            interval: Duration::from_secs(config.apify_poll_interval_secs),
            max_attempts: config.apify_max_poll_attempts,
        },
    )?
    .with_cancellation(cancel);

    tracing::info!(
        model = gateway.model(),
        table = %config.supabase_leads_table,
        actor_id = %config.apify_actor_id,
        "collaborators configured"
    );

    Ok(
        Dispatcher::new(Arc::new(gateway), Arc::new(leads), Arc::new(actor))
            .with_scrape_actor(config.apify_actor_id.clone()),
    )
}

#[cfg(test)]
mod tests {
    use leadmcp_core::Environment;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_owned(),
            openai_api_key: "sk-test".to_owned(),
            openai_base_url: "https://api.openai.com/v1".to_owned(),
            openai_model: "gpt-4".to_owned(),
            openai_temperature: 0.3,
            llm_request_timeout_secs: 60,
            llm_max_retries: 2,
            llm_retry_backoff_base_ms: 500,
            supabase_url: "https://project.supabase.co".to_owned(),
            supabase_anon_key: "anon".to_owned(),
            supabase_leads_table: "qualifiedCommentators".to_owned(),
            apify_token: None,
            apify_base_url: "https://api.apify.com".to_owned(),
            apify_actor_id: "apimaestro/linkedin-profile-detail".to_owned(),
            apify_poll_interval_secs: 5,
            apify_max_poll_attempts: 60,
            slack_bot_token: None,
            slack_signing_secret: None,
        }
    }

    #[test]
    fn wires_clients_from_valid_config() {
        assert!(dispatcher_from_config(&config(), CancellationToken::new()).is_ok());
    }

    #[test]
    fn bad_llm_base_url_is_reported() {
        let mut config = config();
        config.openai_base_url = "not a url".to_owned();
        let err = dispatcher_from_config(&config, CancellationToken::new()).unwrap_err();
        assert!(matches!(err, WiringError::Gateway(_)), "got: {err:?}");
    }

    #[test]
    fn bad_supabase_url_is_reported() {
        let mut config = config();
        config.supabase_url = "::".to_owned();
        let err = dispatcher_from_config(&config, CancellationToken::new()).unwrap_err();
        assert!(matches!(err, WiringError::Store(_)), "got: {err:?}");
    }
}
