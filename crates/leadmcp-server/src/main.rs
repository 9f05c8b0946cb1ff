mod api;
mod middleware;
mod slack;

use std::sync::Arc;

use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
    slack::SlackClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = leadmcp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting leadmcp server");

    let cancel = CancellationToken::new();
    let dispatcher = leadmcp_router::dispatcher_from_config(&config, cancel.clone())?;

    let slack = config
        .slack_bot_token
        .as_deref()
        .map(SlackClient::new)
        .transpose()?;
    if config.slack_signing_secret.is_none() {
        tracing::warn!("SLACK_SIGNING_SECRET not set; Slack requests are not verified");
    }

    let tasks = TaskTracker::new();
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        slack,
        slack_signing_secret: config.slack_signing_secret.as_deref().map(Arc::from),
        tasks: tasks.clone(),
    };
    let auth = AuthState::from_env(matches!(
        config.env,
        leadmcp_core::Environment::Development
    ));
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "MCP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tasks.close();
    if !tasks.is_empty() {
        tracing::info!(pending = tasks.len(), "waiting for in-flight Slack answers");
    }
    tasks.wait().await;
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM and cancels in-flight actor polling.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
    cancel.cancel();
}
