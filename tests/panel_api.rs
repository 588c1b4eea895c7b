mod support;

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use esp32_led_panel::{
    prelude::*,
    server::{app, AppState},
};
use futures::StreamExt;
use support::FakeEsp32;
use tower::ServiceExt;

fn panel(device_address: String) -> AppState {
    let state = PanelState::new(ViewState::new(device_address));
    let orchestrator = Orchestrator::new(
        state.clone(),
        Notifier::new(),
        HttpDeviceClient::new(Duration::from_secs(5)).unwrap(),
    );
    let debouncer = AddressDebouncer::spawn(state, Duration::from_millis(50));

    AppState::new(orchestrator, debouncer)
}

async fn call(state: &AppState, method: Method, uri: &str, body: Option<&str>) -> Response {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    app(state.clone()).oneshot(request).await.unwrap()
}

async fn view(response: Response) -> ViewState {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn serves_the_page() {
    let state = panel("192.168.1.100".to_string());

    let response = call(&state, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("ESP32 LED Controller"));
    assert!(page.contains("/led/{color}/on"));
    // The address field is filled once on load, never by later refreshes
    assert_eq!(page.matches("getElementById('address').value =").count(), 1);
    assert!(page.contains("load();"));
}

#[tokio::test]
async fn reports_initial_state() {
    let state = panel("192.168.1.100".to_string());

    let response = call(&state, Method::GET, "/api/state", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(view(response).await, ViewState::default());
}

#[tokio::test]
async fn toggle_returns_the_new_view() {
    let device = FakeEsp32::ok().await;
    let state = panel(device.addr.to_string());

    let response = call(&state, Method::POST, "/api/leds/1/toggle", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view = view(response).await;
    assert_eq!(
        view.leds.iter().map(|led| led.status).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert!(!view.busy);
    assert_eq!(device.hits(), vec!["/led/blue/on"]);
}

#[tokio::test]
async fn unknown_led_shows_up_in_the_view() {
    let device = FakeEsp32::ok().await;
    let state = panel(device.addr.to_string());

    let response = call(&state, Method::POST, "/api/leds/5/toggle", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(view(response).await.last_error, "Invalid LED ID: 5");
    assert!(device.hits().is_empty());
}

#[tokio::test]
async fn refuses_while_busy() {
    let device = FakeEsp32::ok().await;
    let state = panel(device.addr.to_string());
    state.panel().update(|view| view.busy = true);

    let response = call(&state, Method::POST, "/api/leds/0/toggle", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(device.hits().is_empty());
}

#[tokio::test]
async fn rejects_a_malformed_id() {
    let state = panel("192.168.1.100".to_string());

    let response = call(&state, Method::POST, "/api/leds/blue/toggle", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn address_commits_after_the_debounce() {
    let state = panel("192.168.1.100".to_string());

    for typed in ["10.", "10.0.0.", "10.0.0.9"] {
        let body = format!(r#"{{"address":"{}"}}"#, typed);
        let response = call(&state, Method::PUT, "/api/address", Some(&body)).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    tokio::time::sleep(Duration::from_millis(300)).await;

    let response = call(&state, Method::GET, "/api/state", None).await;
    assert_eq!(view(response).await.device_address, "10.0.0.9");
}

#[tokio::test]
async fn toggle_finishes_when_the_client_hangs_up() {
    let device = FakeEsp32::start(StatusCode::OK, Duration::from_millis(300)).await;
    let state = panel(device.addr.to_string());

    let gave_up = tokio::time::timeout(
        Duration::from_millis(50),
        call(&state, Method::POST, "/api/leds/0/toggle", None),
    )
    .await;
    assert!(gave_up.is_err());

    tokio::time::sleep(Duration::from_millis(600)).await;

    let view = state.panel().snapshot();
    assert_eq!(device.hits(), vec!["/led/yellow/on"]);
    assert!(view.leds[0].status);
    assert!(!view.busy);
}

#[tokio::test]
async fn toasts_stream_as_events() {
    let device = FakeEsp32::ok().await;
    let state = panel(device.addr.to_string());

    let events = call(&state, Method::GET, "/api/events", None).await;
    assert_eq!(events.status(), StatusCode::OK);
    assert_eq!(
        events.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );
    let mut body = events.into_body().into_data_stream();

    let response = call(&state, Method::POST, "/api/leds/5/toggle", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let frame = tokio::time::timeout(Duration::from_secs(2), body.next())
        .await
        .expect("no toast within 2s")
        .expect("event stream ended")
        .unwrap();
    let frame = String::from_utf8(frame.to_vec()).unwrap();

    assert!(frame.contains("event: toast"), "{frame}");
    assert!(frame.contains(r#""message":"Invalid LED ID: 5""#), "{frame}");
    assert!(frame.contains(r#""duration_ms":3000"#), "{frame}");
}
