//! HTTP client for the Supabase PostgREST endpoint holding qualified leads.
//!
//! Translates a [`LeadQuery`] into PostgREST query parameters: ordering,
//! case-insensitive company match, inclusive day range on `created_at`, and a
//! row limit.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::error::StoreError;
use crate::types::{Lead, LeadQuery};

const SELECT_COLUMNS: &str = "userName,companyName,reason,created_at";

/// Read-only client for the leads table.
pub struct SupabaseClient {
    client: Client,
    anon_key: String,
    table_url: Url,
}

impl SupabaseClient {
    /// Creates a client for `{supabase_url}/rest/v1/{table}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`StoreError::InvalidUrl`] if `supabase_url` does not parse.
    pub fn new(
        supabase_url: &str,
        anon_key: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadmcp/0.1 (leads-query)")
            .build()?;

        let joined = format!("{}/rest/v1/{table}", supabase_url.trim_end_matches('/'));
        let table_url = Url::parse(&joined).map_err(|e| StoreError::InvalidUrl {
            url: supabase_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            anon_key: anon_key.to_owned(),
            table_url,
        })
    }

    /// Runs the lead query and returns rows in the order PostgREST yields them.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidDate`] if `query.date` is not `YYYY-MM-DD`.
    /// - [`StoreError::Api`] on a non-2xx response.
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::Deserialize`] if the body is not an array of leads.
    pub async fn query_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, StoreError> {
        let url = self.build_url(query)?;

        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: postgrest_message(&body),
            });
        }

        let leads: Vec<Lead> =
            serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                context: "leads query".to_owned(),
                source: e,
            })?;

        tracing::debug!(rows = leads.len(), limit = query.limit, "leads query complete");
        Ok(leads)
    }

    /// Builds the PostgREST URL for `query`.
    fn build_url(&self, query: &LeadQuery) -> Result<Url, StoreError> {
        let day = query
            .date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| StoreError::InvalidDate {
                    value: raw.to_owned(),
                })
            })
            .transpose()?;

        let mut url = self.table_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", SELECT_COLUMNS);
            let order = if query.latest {
                "created_at.desc"
            } else {
                "id.desc"
            };
            pairs.append_pair("order", order);

            if let Some(company) = query.company.as_deref() {
                pairs.append_pair("companyName", &format!("ilike.*{company}*"));
            }

            if let Some(day) = day {
                let day = day.format("%Y-%m-%d");
                pairs.append_pair("created_at", &format!("gte.{day}T00:00:00"));
                pairs.append_pair("created_at", &format!("lte.{day}T23:59:59"));
            }

            pairs.append_pair("limit", &query.limit.to_string());
        }
        Ok(url)
    }
}

/// Pulls `message` out of a PostgREST error body, falling back to the raw text.
fn postgrest_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}
