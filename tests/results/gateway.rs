//! Gateway event envelopes through the full route table.

use quiz_results::service::GatewayEvent;
use serde_json::{json, Value};

use crate::support::in_memory_service;

fn event(value: Value) -> GatewayEvent {
    serde_json::from_value(value).unwrap()
}

#[test]
fn post_then_get_through_events() {
    let service = in_memory_service();

    let saved = service.dispatch_event(&event(json!({
        "requestContext": { "http": { "method": "POST" } },
        "body": json!({ "userId": "u1", "timestamp": "t1", "score": 87.5 }).to_string()
    })));
    assert_eq!(saved.status_code, 200);
    assert_eq!(
        serde_json::from_str::<Value>(&saved.body).unwrap(),
        json!({ "message": "Success" })
    );

    let history = service.dispatch_event(&event(json!({
        "httpMethod": "GET",
        "queryStringParameters": { "userId": "u1" }
    })));
    assert_eq!(history.status_code, 200);
    let body: Value = serde_json::from_str(&history.body).unwrap();
    assert_eq!(body[0]["score"], json!(87.5));
    assert_eq!(body[0]["gameId"], json!("001_chord_quiz"));
}

#[test]
fn event_responses_carry_cors() {
    let service = in_memory_service();
    let response = service.dispatch_event(&event(json!({
        "requestContext": { "http": { "method": "OPTIONS" } }
    })));
    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
        Some("*")
    );
}

#[test]
fn event_without_method_is_rejected() {
    let service = in_memory_service();
    let response = service.dispatch_event(&event(json!({ "body": null })));
    assert_eq!(response.status_code, 400);
    assert_eq!(
        serde_json::from_str::<Value>(&response.body).unwrap(),
        json!({ "message": "Unsupported method" })
    );
}
