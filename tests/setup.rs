//! Setup-time credential validation against a local HTTP server.

use std::net::TcpListener;

use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxtral_stt::config::EntryStore;
use voxtral_stt::setup::{SetupError, SetupFlow, SetupInput, SetupOutcome};

fn input(api_key: &str, base_url: String) -> SetupInput {
    SetupInput {
        api_key: api_key.into(),
        base_url: Some(base_url),
        model: None,
    }
}

async fn models_endpoint(status: u16) -> MockServer {
    let server = MockServer::start().await;
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "voxtral-mini-latest",
            "object": "model",
            "owned_by": "mistralai"
        }))
    } else {
        ResponseTemplate::new(status).set_body_string(r#"{"detail":"Unauthorized"}"#)
    };
    Mock::given(method("GET"))
        .and(path("/v1/models/voxtral-mini-latest"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn valid_key_creates_and_persists_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/voxtral-mini-latest"))
        .and(header("authorization", "Bearer good-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "voxtral-mini-latest"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let file = dir.path().join("entries.toml");
    let mut store = EntryStore::load_from(&file).unwrap();

    let outcome = SetupFlow::mistral()
        .submit(&mut store, input("good-key", server.uri()))
        .await;
    let SetupOutcome::Created(entry) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(entry.title, "mistral_ai_stt");

    store.save_to(&file).unwrap();
    let reloaded = EntryStore::load_from(&file).unwrap();
    assert_eq!(reloaded.get(&entry.entry_id), Some(&entry));
}

// ---- Scenario C: rejected key ----------------------------------------------

#[tokio::test]
async fn rejected_key_is_invalid_auth() {
    let server = models_endpoint(401).await;
    let mut store = EntryStore::default();

    let outcome = SetupFlow::mistral()
        .submit(&mut store, input("bad-key", server.uri()))
        .await;

    assert_eq!(outcome, SetupOutcome::Invalid(SetupError::InvalidAuth));
    assert!(store.is_empty());
}

#[tokio::test]
async fn server_error_is_unknown() {
    let server = models_endpoint(500).await;
    let mut store = EntryStore::default();

    let outcome = SetupFlow::mistral()
        .submit(&mut store, input("key", server.uri()))
        .await;

    assert_eq!(outcome, SetupOutcome::Invalid(SetupError::Unknown));
    assert!(store.is_empty());
}

// ---- Scenario D: unreachable host ------------------------------------------

#[tokio::test]
async fn unreachable_host_is_cannot_connect() {
    // Reserve a port, then release it so nothing is listening there.
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut store = EntryStore::default();

    let outcome = SetupFlow::mistral()
        .submit(&mut store, input("key", format!("http://{addr}")))
        .await;

    assert_eq!(outcome, SetupOutcome::Invalid(SetupError::CannotConnect));
    assert_eq!(outcome_key(&outcome), "cannot_connect");
    assert!(store.is_empty());
}

fn outcome_key(outcome: &SetupOutcome) -> &'static str {
    match outcome {
        SetupOutcome::Invalid(e) => e.key(),
        SetupOutcome::AlreadyConfigured => "already_configured",
        SetupOutcome::Created(_) => "created",
    }
}

#[tokio::test]
async fn duplicate_settings_abort_without_probing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/voxtral-mini-latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "voxtral-mini-latest"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = EntryStore::default();
    let flow = SetupFlow::mistral();

    assert!(matches!(
        flow.submit(&mut store, input("key", server.uri())).await,
        SetupOutcome::Created(_)
    ));
    assert_eq!(
        flow.submit(&mut store, input("key", server.uri())).await,
        SetupOutcome::AlreadyConfigured
    );
    assert_eq!(store.len(), 1);
}
