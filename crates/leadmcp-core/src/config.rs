use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional =
        |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("LEADMCP_ENV", "development"))?;

    // LEADMCP_BIND_ADDR wins; PORT is honoured for platforms that only inject a port.
    let bind_addr = match lookup("LEADMCP_BIND_ADDR") {
        Ok(raw) => raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid("LEADMCP_BIND_ADDR", e.to_string()))?,
        Err(_) => {
            let port = or_default("PORT", "3000")
                .parse::<u16>()
                .map_err(|e| invalid("PORT", e.to_string()))?;
            SocketAddr::from(([0, 0, 0, 0], port))
        }
    };

    let log_level = or_default("LEADMCP_LOG_LEVEL", "info");

    let openai_api_key = require("OPENAI_API_KEY")?;
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4");
    let openai_temperature = or_default("OPENAI_TEMPERATURE", "0.3")
        .parse::<f32>()
        .map_err(|e| invalid("OPENAI_TEMPERATURE", e.to_string()))?;
    if !(0.0..=2.0).contains(&openai_temperature) {
        return Err(invalid(
            "OPENAI_TEMPERATURE",
            format!("{openai_temperature} is outside 0.0..=2.0"),
        ));
    }
    let llm_request_timeout_secs = parse_u64("LLM_REQUEST_TIMEOUT_SECS", "60")?;
    let llm_max_retries = parse_u32("LLM_MAX_RETRIES", "2")?;
    let llm_retry_backoff_base_ms = parse_u64("LLM_RETRY_BACKOFF_BASE_MS", "500")?;

    let supabase_url = require("SUPABASE_URL")?;
    let supabase_anon_key = require("SUPABASE_ANON_KEY")?;
    let supabase_leads_table = or_default("SUPABASE_LEADS_TABLE", "qualifiedCommentators");

    let apify_token = optional("APIFY_TOKEN");
    let apify_base_url = or_default("APIFY_BASE_URL", "https://api.apify.com");
    let apify_actor_id = or_default("APIFY_ACTOR_ID", "apimaestro/linkedin-profile-detail");
    let apify_poll_interval_secs = parse_u64("APIFY_POLL_INTERVAL_SECS", "5")?;
    let apify_max_poll_attempts = parse_u32("APIFY_MAX_POLL_ATTEMPTS", "60")?;
    if apify_max_poll_attempts == 0 {
        return Err(invalid(
            "APIFY_MAX_POLL_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }

    let slack_bot_token = optional("SLACK_BOT_TOKEN");
    let slack_signing_secret = optional("SLACK_SIGNING_SECRET");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        openai_api_key,
        openai_base_url,
        openai_model,
        openai_temperature,
        llm_request_timeout_secs,
        llm_max_retries,
        llm_retry_backoff_base_ms,
        supabase_url,
        supabase_anon_key,
        supabase_leads_table,
        apify_token,
        apify_base_url,
        apify_actor_id,
        apify_poll_interval_secs,
        apify_max_poll_attempts,
        slack_bot_token,
        slack_signing_secret,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADMCP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
