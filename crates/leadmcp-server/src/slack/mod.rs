//! Slack adapter: request verification, event parsing, reply posting.

pub mod client;
pub mod event;
pub mod signature;

pub use client::SlackClient;
pub use event::Envelope;
