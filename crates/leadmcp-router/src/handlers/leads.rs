use leadmcp_leads::{Lead, LeadQuery, StoreError};

use crate::collaborators::LeadsStore;

pub const NO_LEADS_REPLY: &str = "No leads found.";

/// Queries the store and renders one bullet line per lead.
///
/// # Errors
///
/// Propagates the store's [`StoreError`].
pub async fn get_leads(store: &dyn LeadsStore, query: &LeadQuery) -> Result<String, StoreError> {
    let leads = store.query_leads(query).await?;
    tracing::info!(
        count = leads.len(),
        limit = query.limit,
        latest = query.latest,
        "leads query returned"
    );
    Ok(render_leads(&leads))
}

/// Renders leads in store order; an empty slice yields [`NO_LEADS_REPLY`].
#[must_use]
pub fn render_leads(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return NO_LEADS_REPLY.to_owned();
    }
    leads.iter().map(render_lead).collect::<Vec<_>>().join("\n")
}

fn render_lead(lead: &Lead) -> String {
    format!(
        "• {} ({}) — {}",
        lead.user_name.as_deref().unwrap_or_default(),
        lead.company_name.as_deref().unwrap_or_default(),
        lead.reason.as_deref().unwrap_or_default()
    )
}
