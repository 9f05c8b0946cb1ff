//! Action descriptors produced by the classifier, and their normalization.

use leadmcp_leads::{LeadQuery, MAX_LEAD_LIMIT};
use serde_json::{json, Map, Value};

use crate::error::ClassificationParseError;

/// Filter keys accepted as the row limit, in priority order.
const LIMIT_KEYS: [&str; 3] = ["limit", "count", "quantity"];

/// A classified, normalized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GetLeads(LeadQuery),
    Summarize { text: String },
    /// `url` is `None` when the classifier omitted it or left it blank.
    Scrape { url: Option<String> },
    Chitchat,
    /// Any other `action` value, kept verbatim for the diagnostic reply.
    Unknown(String),
}

impl Action {
    /// Parses raw classifier output into an [`Action`].
    ///
    /// The text must be a JSON object with an `action` field. `summarize`
    /// additionally requires a string `text`. Unrecognized action values are
    /// not errors; they become [`Action::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationParseError`] when the output is not JSON, not an
    /// object, has no `action`, or lacks a field its action requires.
    pub fn from_classifier_output(raw: &str) -> Result<Self, ClassificationParseError> {
        let value: Value =
            serde_json::from_str(raw.trim()).map_err(|e| ClassificationParseError::InvalidJson {
                raw: raw.to_owned(),
                source: e,
            })?;

        let Value::Object(descriptor) = value else {
            return Err(ClassificationParseError::NotAnObject {
                raw: raw.to_owned(),
            });
        };

        Self::from_descriptor(&descriptor).ok_or_else(|| ClassificationParseError::MissingAction {
            raw: raw.to_owned(),
        })?
    }

    /// `None` when `action` is absent; otherwise the parse result.
    fn from_descriptor(
        descriptor: &Map<String, Value>,
    ) -> Option<Result<Self, ClassificationParseError>> {
        let name = match descriptor.get("action")? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let action = match name.as_str() {
            "get-leads" => Ok(Action::GetLeads(normalize_filters(descriptor.get("filters")))),
            "summarize" => match descriptor.get("text").and_then(Value::as_str) {
                Some(text) => Ok(Action::Summarize {
                    text: text.to_owned(),
                }),
                None => Err(ClassificationParseError::MissingField {
                    action: "summarize",
                    field: "text",
                }),
            },
            "scrape" => Ok(Action::Scrape {
                url: descriptor
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_owned),
            }),
            "chitchat" => Ok(Action::Chitchat),
            _ => Ok(Action::Unknown(name)),
        };
        Some(action)
    }

    /// Wire name of the action, as the classifier spells it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Action::GetLeads(_) => "get-leads",
            Action::Summarize { .. } => "summarize",
            Action::Scrape { .. } => "scrape",
            Action::Chitchat => "chitchat",
            Action::Unknown(name) => name,
        }
    }

    /// Renders the normalized descriptor back to classifier JSON.
    ///
    /// Parsing the result yields an equal [`Action`].
    #[must_use]
    pub fn to_descriptor(&self) -> Value {
        match self {
            Action::GetLeads(query) => json!({ "action": "get-leads", "filters": query }),
            Action::Summarize { text } => json!({ "action": "summarize", "text": text }),
            Action::Scrape { url: Some(url) } => json!({ "action": "scrape", "url": url }),
            Action::Scrape { url: None } => json!({ "action": "scrape" }),
            Action::Chitchat => json!({ "action": "chitchat" }),
            Action::Unknown(name) => json!({ "action": name }),
        }
    }
}

/// Normalizes `get-leads` filters.
///
/// - `limit`: first positive value of `limit`, `count`, `quantity`
///   (integer or numeric string), default 10, never above 10.
/// - `latest`: set when `latest` or `recent` is truthy or `sort` is `"latest"`.
/// - `company`, `date`: passed through when they are strings.
///
/// Non-object input is treated as no filters.
#[must_use]
pub fn normalize_filters(filters: Option<&Value>) -> LeadQuery {
    let Some(filters) = filters.and_then(Value::as_object) else {
        return LeadQuery::default();
    };

    let limit = LIMIT_KEYS
        .iter()
        .find_map(|key| filters.get(*key).and_then(positive_count))
        .unwrap_or(MAX_LEAD_LIMIT)
        .min(MAX_LEAD_LIMIT);

    let latest = ["latest", "recent"]
        .iter()
        .any(|key| filters.get(*key).is_some_and(is_truthy))
        || filters.get("sort").and_then(Value::as_str) == Some("latest");

    let text = |key: &str| filters.get(key).and_then(Value::as_str).map(str::to_owned);

    LeadQuery {
        limit,
        company: text("company"),
        latest,
        date: text("date"),
    }
}

/// Reads a strictly positive count; fractional numbers are floored.
fn positive_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0)
                .map(|f| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let floored = f.floor() as u64;
                    floored
                })
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (n > 0).then(|| u32::try_from(n).unwrap_or(u32::MAX))
}

/// JavaScript-style truthiness, which is how the classifier's booleans are
/// sometimes spelled (`"true"`, `1`).
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
