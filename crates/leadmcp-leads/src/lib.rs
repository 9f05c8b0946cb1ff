//! Read-only access to qualified leads stored in Supabase.

pub mod client;
pub mod error;
pub mod types;

pub use client::SupabaseClient;
pub use error::StoreError;
pub use types::{Lead, LeadQuery, MAX_LEAD_LIMIT};
