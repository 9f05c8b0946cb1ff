//! Bounded, cancellable polling of an actor run.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::ActorError;
use crate::types::ActorRun;

/// How often and how many times a run's status is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// Re-fetches `run` with `fetch` until it reaches a terminal status.
///
/// Sleeps `policy.interval` before each check. Returns
/// [`ActorError::PollTimeout`] once `policy.max_attempts` checks have passed
/// without a terminal status, and [`ActorError::Cancelled`] as soon as
/// `cancel` fires.
pub(crate) async fn wait_for_terminal<F, Fut>(
    run: ActorRun,
    policy: PollPolicy,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<ActorRun, ActorError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ActorRun, ActorError>>,
{
    let mut current = run;
    let mut attempts = 0u32;

    while !current.status.is_terminal() {
        if attempts >= policy.max_attempts {
            return Err(ActorError::PollTimeout {
                run_id: current.id,
                status: current.status.to_string(),
                attempts,
            });
        }

        tokio::select! {
            () = cancel.cancelled() => {
                return Err(ActorError::Cancelled { run_id: current.id });
            }
            () = tokio::time::sleep(policy.interval) => {}
        }

        attempts += 1;
        current = fetch(current.id.clone()).await?;
        tracing::debug!(
            run_id = %current.id,
            status = %current.status,
            attempts,
            "actor run status checked"
        );
    }

    Ok(current)
}
