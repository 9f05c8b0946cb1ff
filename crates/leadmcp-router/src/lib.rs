//! Intent routing core.
//!
//! A free-text message is classified by the LLM into an [`Action`], the action
//! is normalized and dispatched to exactly one handler, and any failure along
//! the way falls back to a plain assistant answer.

pub mod action;
pub mod collaborators;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod prompts;
pub mod wiring;

pub use action::{normalize_filters, Action};
pub use collaborators::{ActorRunner, ClassifierGateway, LeadsStore};
pub use dispatch::{Dispatcher, IncomingMessage, DEFAULT_SCRAPE_ACTOR};
pub use error::{ClassificationParseError, DispatchError, WiringError};
pub use wiring::dispatcher_from_config;
pub use leadmcp_apify::ActorError;
pub use leadmcp_leads::{Lead, LeadQuery, StoreError};
pub use leadmcp_llm::GatewayError;
