use serde_json::json;

use super::*;

fn normalize(filters: &Value) -> LeadQuery {
    normalize_filters(Some(filters))
}

// -------------------------------------------------------------------------
// Filter normalization
// -------------------------------------------------------------------------

#[test]
fn limit_is_clamped_to_ten() {
    assert_eq!(normalize(&json!({ "limit": 50 })).limit, 10);
}

#[test]
fn count_is_a_limit_synonym() {
    assert_eq!(normalize(&json!({ "count": 3 })).limit, 3);
    assert_eq!(normalize(&json!({ "quantity": 4 })).limit, 4);
}

#[test]
fn missing_limit_defaults_to_ten() {
    assert_eq!(normalize(&json!({})).limit, 10);
    assert_eq!(normalize_filters(None).limit, 10);
}

#[test]
fn limit_takes_priority_over_synonyms() {
    assert_eq!(normalize(&json!({ "limit": 2, "count": 7 })).limit, 2);
}

#[test]
fn zero_and_negative_limits_fall_through() {
    assert_eq!(normalize(&json!({ "limit": 0, "count": 6 })).limit, 6);
    assert_eq!(normalize(&json!({ "limit": -5 })).limit, 10);
}

#[test]
fn numeric_strings_and_fractions_are_accepted() {
    assert_eq!(normalize(&json!({ "limit": "5" })).limit, 5);
    assert_eq!(normalize(&json!({ "limit": 2.9 })).limit, 2);
    assert_eq!(normalize(&json!({ "limit": "lots" })).limit, 10);
}

#[test]
fn sort_latest_sets_latest() {
    assert!(normalize(&json!({ "sort": "latest" })).latest);
    assert!(!normalize(&json!({ "sort": "oldest" })).latest);
}

#[test]
fn recent_sets_latest() {
    assert!(normalize(&json!({ "recent": true })).latest);
    assert!(normalize(&json!({ "latest": "yes" })).latest);
    assert!(normalize(&json!({ "latest": 1 })).latest);
}

#[test]
fn latest_is_unset_by_default() {
    assert!(!normalize(&json!({})).latest);
    assert!(!normalize(&json!({ "latest": false, "recent": 0 })).latest);
}

#[test]
fn company_and_date_pass_through() {
    let query = normalize(&json!({ "company": "Acq Advisory", "date": "2024-03-07" }));
    assert_eq!(query.company.as_deref(), Some("Acq Advisory"));
    assert_eq!(query.date.as_deref(), Some("2024-03-07"));
}

#[test]
fn non_object_filters_are_ignored() {
    assert_eq!(normalize(&json!("latest please")), LeadQuery::default());
    assert_eq!(normalize(&json!([1, 2, 3])), LeadQuery::default());
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        json!({}),
        json!({ "limit": 50 }),
        json!({ "count": "3", "recent": true }),
        json!({ "quantity": 2, "sort": "latest", "company": "Acme", "date": "2024-01-31" }),
        json!({ "latest": false, "limit": 0 }),
    ];
    for input in inputs {
        let once = normalize(&input);
        let again = normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, again, "normalizing {input} twice changed the result");
    }
}

// -------------------------------------------------------------------------
// Descriptor parsing
// -------------------------------------------------------------------------

#[test]
fn parses_get_leads_with_filters() {
    let action = Action::from_classifier_output(
        r#"{"action":"get-leads","filters":{"latest":true,"limit":5}}"#,
    )
    .unwrap();
    assert_eq!(
        action,
        Action::GetLeads(LeadQuery {
            limit: 5,
            company: None,
            latest: true,
            date: None,
        })
    );
}

#[test]
fn parses_get_leads_without_filters() {
    let action = Action::from_classifier_output(r#"{"action":"get-leads"}"#).unwrap();
    assert_eq!(action, Action::GetLeads(LeadQuery::default()));
}

#[test]
fn parses_summarize() {
    let action =
        Action::from_classifier_output(r#"{"action":"summarize","text":"call went badly"}"#)
            .unwrap();
    assert_eq!(
        action,
        Action::Summarize {
            text: "call went badly".to_owned()
        }
    );
}

#[test]
fn summarize_without_text_is_a_parse_error() {
    let err = Action::from_classifier_output(r#"{"action":"summarize"}"#).unwrap_err();
    assert!(matches!(
        err,
        ClassificationParseError::MissingField {
            action: "summarize",
            field: "text"
        }
    ));
}

#[test]
fn parses_scrape_and_ignores_type() {
    let action = Action::from_classifier_output(
        r#"{"action":"scrape","url":"https://linkedin.com/in/johndoe","type":"linkedin"}"#,
    )
    .unwrap();
    assert_eq!(
        action,
        Action::Scrape {
            url: Some("https://linkedin.com/in/johndoe".to_owned())
        }
    );
}

#[test]
fn blank_scrape_url_is_missing() {
    let action = Action::from_classifier_output(r#"{"action":"scrape","url":"  "}"#).unwrap();
    assert_eq!(action, Action::Scrape { url: None });
}

#[test]
fn unknown_action_is_kept_verbatim() {
    let action = Action::from_classifier_output(r#"{"action":"frobnicate"}"#).unwrap();
    assert_eq!(action, Action::Unknown("frobnicate".to_owned()));
}

#[test]
fn non_string_action_is_unknown() {
    let action = Action::from_classifier_output(r#"{"action":42}"#).unwrap();
    assert_eq!(action, Action::Unknown("42".to_owned()));
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let action = Action::from_classifier_output("\n  {\"action\": \"chitchat\"}\n").unwrap();
    assert_eq!(action, Action::Chitchat);
}

#[test]
fn prose_is_a_parse_error() {
    let err = Action::from_classifier_output("Sure! Here are your leads.").unwrap_err();
    assert!(matches!(err, ClassificationParseError::InvalidJson { .. }));
}

#[test]
fn non_object_json_is_a_parse_error() {
    let err = Action::from_classifier_output(r#"["get-leads"]"#).unwrap_err();
    assert!(matches!(err, ClassificationParseError::NotAnObject { .. }));
}

#[test]
fn missing_action_is_a_parse_error() {
    let err = Action::from_classifier_output(r#"{"filters":{}}"#).unwrap_err();
    assert!(matches!(err, ClassificationParseError::MissingAction { .. }));
}

#[test]
fn descriptor_round_trip_is_stable() {
    let raws = [
        r#"{"action":"get-leads","filters":{"count":30,"sort":"latest","company":"Acme"}}"#,
        r#"{"action":"summarize","text":"abc"}"#,
        r#"{"action":"scrape","url":"https://x.com/in/johndoe"}"#,
        r#"{"action":"scrape"}"#,
        r#"{"action":"chitchat"}"#,
        r#"{"action":"frobnicate"}"#,
    ];
    for raw in raws {
        let action = Action::from_classifier_output(raw).unwrap();
        let again = Action::from_classifier_output(&action.to_descriptor().to_string()).unwrap();
        assert_eq!(action, again, "re-parsing {raw} changed the action");
    }
}

#[test]
fn name_matches_wire_spelling() {
    assert_eq!(Action::GetLeads(LeadQuery::default()).name(), "get-leads");
    assert_eq!(Action::Chitchat.name(), "chitchat");
    assert_eq!(Action::Unknown("x".into()).name(), "x");
}
