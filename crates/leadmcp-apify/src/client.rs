//! HTTP client for the Apify v2 REST API.
//!
//! One call to [`ApifyClient::run_actor`] starts a run, waits for it under a
//! [`PollPolicy`], then reads the run's default dataset. When the dataset is
//! empty the `OUTPUT` record of the run's key-value store is used instead.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ActorError;
use crate::poll::{wait_for_terminal, PollPolicy};
use crate::types::{ActorRun, DataEnvelope, RunStatus};

const DEFAULT_BASE_URL: &str = "https://api.apify.com";

/// Client for starting Apify actors and collecting their output.
pub struct ApifyClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
    policy: PollPolicy,
    cancel: CancellationToken,
}

impl ApifyClient {
    /// Creates a client pointed at the public Apify API.
    ///
    /// A missing `token` is accepted here; every run then fails with
    /// [`ActorError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        token: Option<String>,
        timeout_secs: u64,
        policy: PollPolicy,
    ) -> Result<Self, ActorError> {
        Self::with_base_url(token, DEFAULT_BASE_URL, timeout_secs, policy)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ActorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: Option<String>,
        base_url: &str,
        timeout_secs: u64,
        policy: PollPolicy,
    ) -> Result<Self, ActorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadmcp/0.1 (profile-scrape)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ActorError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token,
            base_url,
            policy,
            cancel: CancellationToken::new(),
        })
    }

    /// Ties in-flight waits to `token`; cancelling it aborts every pending poll.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Runs `actor_id` (`owner/name` or `owner~name`) with `input` and returns
    /// its output: the dataset items array, or the `OUTPUT` record value.
    ///
    /// # Errors
    ///
    /// - [`ActorError::NotConfigured`] when no token was supplied.
    /// - [`ActorError::InvalidActorId`] for a malformed actor id.
    /// - [`ActorError::RunFailed`] when the run ends in a non-success status.
    /// - [`ActorError::PollTimeout`] / [`ActorError::Cancelled`] from the wait.
    /// - [`ActorError::MissingOutput`] when the run has no dataset.
    /// - [`ActorError::Api`] / [`ActorError::Http`] / [`ActorError::Deserialize`]
    ///   for transport and shape failures.
    pub async fn run_actor(&self, actor_id: &str, input: &Value) -> Result<Value, ActorError> {
        let token = self.token.as_deref().ok_or(ActorError::NotConfigured)?;
        let actor_path = actor_path(actor_id)?;

        tracing::info!(actor_id, "starting Apify actor run");
        let url = self.endpoint(&["v2", "acts", &actor_path, "runs"])?;
        let started: DataEnvelope<ActorRun> = self
            .send_json(self.client.post(url).bearer_auth(token).json(input), "start run")
            .await?;
        tracing::info!(run_id = %started.data.id, status = %started.data.status, "actor run started");

        let run = wait_for_terminal(started.data, self.policy, &self.cancel, |run_id| {
            self.fetch_run(token, run_id)
        })
        .await?;

        if run.status != RunStatus::Succeeded {
            tracing::warn!(run_id = %run.id, status = %run.status, "actor run did not succeed");
            return Err(ActorError::RunFailed {
                run_id: run.id,
                status: run.status.to_string(),
            });
        }

        self.fetch_output(token, &run).await
    }

    async fn fetch_run(&self, token: &str, run_id: String) -> Result<ActorRun, ActorError> {
        let url = self.endpoint(&["v2", "actor-runs", &run_id])?;
        let envelope: DataEnvelope<ActorRun> = self
            .send_json(self.client.get(url).bearer_auth(token), "run status")
            .await?;
        Ok(envelope.data)
    }

    async fn fetch_output(&self, token: &str, run: &ActorRun) -> Result<Value, ActorError> {
        let dataset_id = run
            .default_dataset_id
            .as_deref()
            .ok_or_else(|| ActorError::MissingOutput {
                run_id: run.id.clone(),
                what: "dataset id",
            })?;

        let mut url = self.endpoint(&["v2", "datasets", dataset_id, "items"])?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("clean", "true");
        let items: Value = self
            .send_json(self.client.get(url).bearer_auth(token), "dataset items")
            .await?;

        let is_empty = items.as_array().is_some_and(Vec::is_empty);
        if !is_empty {
            return Ok(items);
        }

        let Some(store_id) = run.default_key_value_store_id.as_deref() else {
            return Ok(items);
        };

        tracing::debug!(run_id = %run.id, "dataset empty, reading OUTPUT record");
        let url = self.endpoint(&["v2", "key-value-stores", store_id, "records", "OUTPUT"])?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(items);
        }
        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ActorError::Deserialize {
            context: "OUTPUT record".to_owned(),
            source: e,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, ActorError> {
        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ActorError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ActorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ActorError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "base URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Converts `owner/name` to the `owner~name` form used in API paths.
fn actor_path(actor_id: &str) -> Result<String, ActorError> {
    let invalid = || ActorError::InvalidActorId(actor_id.to_owned());
    let (owner, name) = actor_id
        .split_once('/')
        .or_else(|| actor_id.split_once('~'))
        .ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains(['/', '~']) {
        return Err(invalid());
    }
    Ok(format!("{owner}~{name}"))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ActorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned());
    Err(ActorError::Api {
        status: status.as_u16(),
        message,
    })
}
