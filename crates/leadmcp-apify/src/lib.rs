//! Apify actor runner: start a run, poll it to a terminal state, read its output.

pub mod client;
pub mod error;
pub mod poll;
pub mod types;

pub use client::ApifyClient;
pub use error::ActorError;
pub use poll::PollPolicy;
pub use types::RunStatus;
