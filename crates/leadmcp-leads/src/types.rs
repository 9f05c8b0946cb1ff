use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of leads returned by one query.
pub const MAX_LEAD_LIMIT: u32 = 10;

/// One qualified lead row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
    #[serde(rename = "companyName", default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Normalized lead filters.
///
/// Serializes back to the raw filter shape the classifier emits, so a
/// normalized query can be fed through normalization again unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadQuery {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// `true` orders by `created_at` descending; `false` by row id descending.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub latest: bool,
    /// Inclusive single-day filter, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            limit: MAX_LEAD_LIMIT,
            company: None,
            latest: false,
            date: None,
        }
    }
}
