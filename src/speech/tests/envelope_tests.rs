//! Unit tests for the request envelope model.

use crate::speech::domain::{Intent, RequestEnvelope, Session, SkillRequest};
use chrono::{TimeZone, Utc};
use serde_json::json;

fn intent_request_json() -> serde_json::Value {
    json!({
        "version": "1.0",
        "session": {
            "sessionId": "session-1",
            "application": { "applicationId": "app-1" },
            "attributes": { "name": "Ada" },
            "new": false
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "request-1",
            "timestamp": "2024-05-01T12:00:00Z",
            "intent": {
                "name": "GreetIntent",
                "slots": {
                    "city": { "name": "city", "value": "Berlin" },
                    "mood": { "name": "mood" }
                }
            }
        }
    })
}

#[test]
fn deserialises_intent_request() {
    let envelope: RequestEnvelope =
        serde_json::from_value(intent_request_json()).expect("envelope should deserialise");

    assert_eq!(envelope.application_id(), "app-1");
    let intent = envelope.request.intent().expect("intent should be present");
    assert_eq!(intent.name, "GreetIntent");
    assert_eq!(intent.slot_value("city"), Some("Berlin"));
}

#[test]
fn unfilled_and_unknown_slots_have_no_value() {
    let envelope: RequestEnvelope =
        serde_json::from_value(intent_request_json()).expect("envelope should deserialise");

    let intent = envelope.request.intent().expect("intent should be present");
    assert_eq!(intent.slot_value("mood"), None);
    assert_eq!(intent.slot_value("country"), None);
}

#[test]
fn parses_request_timestamp() {
    let envelope: RequestEnvelope =
        serde_json::from_value(intent_request_json()).expect("envelope should deserialise");

    let expected = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    assert_eq!(envelope.request.timestamp(), Some(expected));
}

#[test]
fn deserialises_launch_request_without_optional_fields() {
    let envelope: RequestEnvelope = serde_json::from_value(json!({
        "session": {
            "application": { "applicationId": "app-1" }
        },
        "request": { "type": "LaunchRequest" }
    }))
    .expect("minimal envelope should deserialise");

    assert!(matches!(envelope.request, SkillRequest::Launch { .. }));
    assert_eq!(envelope.request.timestamp(), None);
}

#[test]
fn session_ended_carries_reason() {
    let envelope: RequestEnvelope = serde_json::from_value(json!({
        "session": { "application": { "applicationId": "app-1" } },
        "request": { "type": "SessionEndedRequest", "reason": "USER_INITIATED" }
    }))
    .expect("envelope should deserialise");

    let SkillRequest::SessionEnded { reason, .. } = envelope.request else {
        panic!("expected a session-ended request");
    };
    assert_eq!(reason.as_deref(), Some("USER_INITIATED"));
}

#[test]
fn intent_request_without_intent_yields_none() {
    let envelope: RequestEnvelope = serde_json::from_value(json!({
        "session": { "application": { "applicationId": "app-1" } },
        "request": { "type": "IntentRequest" }
    }))
    .expect("envelope should deserialise");

    assert!(envelope.request.intent().is_none());
}

#[test]
fn session_attribute_helpers_round_trip() {
    let mut session = Session::for_application("app-1");

    assert_eq!(session.attribute_string("name"), None);

    session.put_attribute_string("name", "Ada");
    assert_eq!(session.attribute_string("name"), Some("Ada"));

    session.put_attribute_string("name", "Grace");
    assert_eq!(session.attribute_string("name"), Some("Grace"));

    session.remove_attribute("name");
    assert_eq!(session.attribute_string("name"), None);
}

#[test]
fn non_string_attributes_read_as_none() {
    let mut session = Session::for_application("app-1");
    session
        .attributes
        .insert("count".to_owned(), serde_json::json!(3));

    assert_eq!(session.attribute_string("count"), None);
}

#[test]
fn serialises_request_type_tags() {
    let envelope = RequestEnvelope::new(
        Session::for_application("app-1"),
        SkillRequest::Intent {
            request_id: "request-1".to_owned(),
            timestamp: None,
            intent: Some(Intent::named("GreetIntent")),
        },
    );

    let value = serde_json::to_value(&envelope).expect("envelope should serialise");
    assert_eq!(value["request"]["type"], "IntentRequest");
    assert_eq!(value["session"]["application"]["applicationId"], "app-1");
}
