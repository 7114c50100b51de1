use std::net::SocketAddr;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use panel_api::{build_app, build_router, ApiConfig, ApiState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_app(&ApiConfig::default())
}

fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn ask(text: &str) -> Request<Body> {
    chat_request(
        json!({
            "language": "en",
            "messages": [{ "role": "user", "content": text }]
        })
        .to_string(),
    )
}

async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_metrics() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["requests_total"], 0);
}

#[tokio::test]
async fn chat_lists_services() {
    let response = app().oneshot(ask("What services do you offer?")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["action"], "list_services");
    assert_eq!(parsed["language"], "en");
    assert!(parsed["reply"]
        .as_str()
        .unwrap()
        .contains("• Chassis measuring and straightening"));
    assert!(parsed.get("fieldsRequested").is_none());
}

#[tokio::test]
async fn greeting_with_booking_is_a_booking() {
    let response = app().oneshot(ask("hi, can I book my car in")).await.unwrap();
    let parsed = json_body(response).await;

    assert_eq!(parsed["action"], "booking_flow");
    assert_eq!(
        parsed["fieldsRequested"],
        json!(["fullName", "phone", "preferredDate", "vehicleMakeModel", "notes"])
    );
    assert_eq!(parsed["suggestions"], json!(["Share my details"]));
}

#[tokio::test]
async fn reference_number_gets_simulated_status() {
    let response = app().oneshot(ask("My reference is DJ-12345")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["action"], "status_lookup");
    assert_eq!(
        parsed["reply"],
        "Status for DJ-12345: Assessment complete. Estimated completion in 2–3 days."
    );
    assert_eq!(parsed["fieldsRequested"], json!(["jobRef", "vehicleReg"]));
    assert_eq!(parsed["suggestions"], json!(["Book my car in", "Contact us"]));
}

#[tokio::test]
async fn afrikaans_hint_switches_language() {
    let request = chat_request(
        json!({
            "messages": [{ "role": "user", "content": "Kan ek my kar inbring vir ’n skatting, dankie?" }]
        })
        .to_string(),
    );
    let parsed = json_body(app().oneshot(request).await.unwrap()).await;

    assert_eq!(parsed["language"], "af");
    assert_eq!(parsed["action"], "estimate_flow");
    assert_eq!(
        parsed["suggestions"],
        json!(["Boek ’n inspeksie", "Hulp met versekeringseis"])
    );
}

#[tokio::test]
async fn browser_history_payload_is_accepted() {
    let mut messages = vec![json!({
        "id": "greeting",
        "role": "assistant",
        "content": "Welcome!",
        "timestamp": 1_700_000_000_000u64
    })];
    for turn in 0..11 {
        messages.push(json!({
            "id": format!("u{turn}"),
            "role": if turn % 2 == 0 { "user" } else { "assistant" },
            "content": "any maintenance advice?",
            "timestamp": 1_700_000_000_000u64 + turn as u64,
            "attachments": [{ "name": "dent.jpg", "type": "image/jpeg", "dataUrl": "data:image/jpeg;base64,AAAA" }]
        }));
    }

    let request = chat_request(json!({ "language": "en", "messages": messages }).to_string());
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["action"], "tips");
}

#[tokio::test]
async fn empty_history_gets_default_menu() {
    let response = app()
        .oneshot(chat_request(json!({ "messages": [] }).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["action"], "general_info");
    assert_eq!(parsed["suggestions"], json!(["Get an estimate", "Book my car in"]));
}

#[tokio::test]
async fn malformed_body_is_a_server_error() {
    let response = app().oneshot(chat_request("not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "reply": "Server error", "language": "en" })
    );
}

#[tokio::test]
async fn missing_messages_is_a_server_error() {
    let response = app()
        .oneshot(chat_request(json!({ "language": "af" }).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["reply"], "Server error");
}

#[tokio::test]
async fn errors_are_counted_on_health() {
    let app = app();
    app.clone().oneshot(chat_request("{")).await.unwrap();
    app.clone().oneshot(ask("hello")).await.unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = json_body(response).await;
    assert_eq!(parsed["metrics"]["errors_total"], 1);
    assert_eq!(parsed["metrics"]["requests_total"], 1);
}

#[tokio::test]
async fn welcome_is_localized() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/chat/welcome?language=af")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["language"], "af");
    assert_eq!(parsed["suggestions"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["suggestions"][0], "Watter dienste bied julle?");
}

#[tokio::test]
async fn welcome_defaults_to_english() {
    let response = app()
        .oneshot(Request::builder().uri("/api/chat/welcome").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = json_body(response).await;

    assert_eq!(parsed["language"], "en");
    assert_eq!(parsed["brand"]["company"], "De Jongh’s Panelbeating Centre");
}

fn from_peer(mut request: Request<Body>, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

fn forwarded_for(mut request: Request<Body>, value: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert("x-forwarded-for", value.parse().unwrap());
    request
}

fn strict_limit() -> ApiConfig {
    ApiConfig {
        rate_limit_max: 1,
        rate_limit_window: Duration::from_secs(60),
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn rate_limit_applies_per_peer_address() {
    let app = build_app(&strict_limit());

    let first = app.clone().oneshot(from_peer(ask("hello"), "10.0.0.1:50000")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(from_peer(ask("hello"), "10.0.0.1:50001")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let other = app.oneshot(from_peer(ask("hello"), "10.0.0.2:50000")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_bypass_the_limit() {
    let app = build_app(&strict_limit());

    let mut accepted = 0;
    for n in 0..50 {
        let request = forwarded_for(
            from_peer(ask("hello"), "10.0.0.1:50000"),
            &format!("192.0.2.{n}"),
        );
        if app.clone().oneshot(request).await.unwrap().status() == StatusCode::OK {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn trusted_forwarded_for_keys_by_original_client() {
    let config = ApiConfig {
        trust_forwarded_for: true,
        ..strict_limit()
    };
    let app = build_app(&config);
    let via_proxy = |client: &str| forwarded_for(from_peer(ask("hello"), "10.0.0.9:443"), client);

    let first = app.clone().oneshot(via_proxy("203.0.113.7, 10.0.0.9")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let repeat = app.clone().oneshot(via_proxy("203.0.113.7")).await.unwrap();
    assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);

    let other = app.oneshot(via_proxy("203.0.113.8")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_is_a_server_error() {
    let config = ApiConfig {
        body_limit_bytes: 64,
        ..ApiConfig::default()
    };
    let app = build_app(&config);
    let text = "please quote ".repeat(16);

    let response = app.clone().oneshot(ask(&text)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "reply": "Server error", "language": "en" })
    );

    let body = json!({ "messages": [{ "role": "user", "content": text }] }).to_string();
    let mut request = chat_request(body.clone());
    request
        .headers_mut()
        .insert("content-length", body.len().to_string().parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["reply"], "Server error");
}

#[tokio::test]
async fn router_can_be_built_from_shared_state() {
    let config = ApiConfig::default();
    let state = ApiState::new(&config);
    let app = build_router(state.clone(), &config);

    let response = app.oneshot(ask("hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.metrics.snapshot().requests_total, 1);
    assert_eq!(state.limiter.tracked_clients(), 1);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = app().oneshot(ask("hello")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}
