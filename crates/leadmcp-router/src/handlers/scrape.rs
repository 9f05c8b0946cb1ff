//! Profile scraping through the remote actor.
//!
//! Every outcome of this handler is a reply string. Actor failures are logged
//! and turned into a `Scrape failed: ...` reply instead of reaching the
//! fallback path.

use serde_json::{json, Map, Value};
use url::Url;

use crate::collaborators::ActorRunner;

pub const MISSING_URL_REPLY: &str = "Missing profile URL.";
pub const BAD_URL_REPLY: &str = "Could not extract username from URL.";
pub const NO_PROFILE_REPLY: &str = "No profile data found.";

/// Characters of `about` kept before truncation.
const ABOUT_MAX_CHARS: usize = 300;

/// Renderable fields of a record's `basic_info` object.
///
/// Actor output is loosely typed, so a field of an unexpected type is
/// dropped on its own instead of discarding the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub fullname: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub current_company: Option<String>,
    pub about: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl BasicInfo {
    /// Reads `basic_info` from one actor record; `None` when it is absent or
    /// not an object.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let info = record.get("basic_info")?.as_object()?;
        Some(Self {
            fullname: text(info, "fullname"),
            headline: text(info, "headline"),
            location: text_or_field(info, "location", "full"),
            current_company: text_or_field(info, "current_company", "name"),
            about: text(info, "about"),
            profile_picture_url: text(info, "profile_picture_url"),
        })
    }
}

fn text(info: &Map<String, Value>, key: &str) -> Option<String> {
    info.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// A plain string, or an object carrying the text under `field`.
fn text_or_field(info: &Map<String, Value>, key: &str, field: &str) -> Option<String> {
    match info.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Object(nested) => text(nested, field),
        _ => None,
    }
}

/// Scrapes the profile at `url` with `actor_id` and renders it.
pub async fn scrape(runner: &dyn ActorRunner, actor_id: &str, url: Option<&str>) -> String {
    let Some(url) = url else {
        return MISSING_URL_REPLY.to_owned();
    };
    let Some(username) = extract_username(url) else {
        tracing::info!(url, "no username in profile URL");
        return BAD_URL_REPLY.to_owned();
    };

    tracing::info!(actor_id, username = %username, "running profile scrape");
    match runner.run(actor_id, json!({ "username": username })).await {
        Ok(output) => render_output(&output),
        Err(e) => {
            tracing::error!(actor_id, error = %e, "profile scrape failed");
            format!("Scrape failed: {e}")
        }
    }
}

/// Last non-empty path segment of `url`, e.g. `johndoe` for
/// `https://linkedin.com/in/johndoe/`.
#[must_use]
pub fn extract_username(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_owned)
}

/// Renders actor output: the first element of an array, or the value itself.
#[must_use]
pub fn render_output(output: &Value) -> String {
    let record = match output {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    record
        .and_then(BasicInfo::from_record)
        .and_then(|info| render_profile(&info))
        .unwrap_or_else(|| NO_PROFILE_REPLY.to_owned())
}

/// One line per present field; `None` when nothing is renderable.
#[must_use]
pub fn render_profile(info: &BasicInfo) -> Option<String> {
    let lines: Vec<String> = [
        present(info.fullname.as_deref()).map(|v| format!("👤 {v}")),
        present(info.headline.as_deref()).map(|v| format!("💼 {v}")),
        present(info.location.as_deref()).map(|v| format!("📍 {v}")),
        present(info.current_company.as_deref()).map(|v| format!("🏢 {v}")),
        present(info.about.as_deref()).map(|v| format!("📝 {}", truncate_about(v))),
        present(info.profile_picture_url.as_deref()).map(|v| format!("🖼 {v}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn truncate_about(about: &str) -> String {
    match about.char_indices().nth(ABOUT_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &about[..cut]),
        None => about.to_owned(),
    }
}
