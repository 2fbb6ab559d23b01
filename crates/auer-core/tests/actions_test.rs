#![allow(clippy::unwrap_used)]
// Command action and query adapter tests against a wiremock appliance.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use auer_api::{DigestCredentials, PbxClient, TransportConfig};
use auer_core::{CoreError, Outcome, Pbx};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Pbx) {
    let server = MockServer::start().await;
    let client = PbxClient::with_base_url(
        Url::parse(&server.uri()).unwrap(),
        DigestCredentials::new("admin", "secret".to_string().into()),
        &TransportConfig::default(),
    )
    .unwrap();
    let pbx = Pbx::new(client, "pbx.example.lan").with_settle_delay(Duration::ZERO);
    (server, pbx)
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn autoswitch(enabled: &str, relay_name: &str) -> Value {
    json!({
        "switchCfgCb": enabled,
        "switchSysRelais": "1",
        "switchSysRelaisName": relay_name
    })
}

fn two_configurations() -> Value {
    json!({
        "rows": [
            { "id": 1, "data": ["Day", "10"], "userdata": { "active": true } },
            { "id": 2, "data": ["Night", "20"] }
        ]
    })
}

/// Expect exactly `n` autoswitch writes.
async fn expect_autoswitch_writes(server: &MockServer, n: u64) {
    Mock::given(method("POST"))
        .and(path("/config_autoswitch_save"))
        .respond_with(ResponseTemplate::new(200))
        .expect(n)
        .mount(server)
        .await;
}

/// Expect exactly `n` configuration switches.
async fn expect_config_writes(server: &MockServer, n: u64) {
    Mock::given(method("POST"))
        .and(path("/configs_set"))
        .respond_with(ResponseTemplate::new(200))
        .expect(n)
        .mount(server)
        .await;
}

// ── Identity ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_identity_documents_fetched_once() {
    let (server, pbx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "pbx": "COMpact 5500R", "pbxEdit": "Zentrale" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": " 7.4A ",
            "date": "12.03.2024",
            "serial": "4711"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(pbx.product().await.unwrap(), "COMpact 5500R");
    assert_eq!(pbx.name().await.unwrap(), "Zentrale");
    assert_eq!(pbx.firmware().await.unwrap(), "7.4A");
    assert_eq!(pbx.date().await.unwrap(), "12.03.2024");
    assert_eq!(pbx.serial().await.unwrap(), "4711");
    assert_eq!(pbx.product().await.unwrap(), "COMpact 5500R");
}

#[tokio::test]
async fn test_overview_combines_all_documents() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/tree", json!([{ "pbx": "COMpact 4000", "pbxEdit": "Büro" }])).await;
    mount_get(
        &server,
        "/about_state",
        json!({ "version": "8.2B\n", "date": "01.01.2025", "serial": "0815" }),
    )
    .await;
    mount_get(&server, "/logstatus_state", json!({ "logstatus": "sub-admin" })).await;
    mount_get(&server, "/config_autoswitch_state", autoswitch("1", "Relais 1")).await;
    mount_get(&server, "/configs_state", two_configurations()).await;

    let overview = pbx.overview().await.unwrap();

    assert_eq!(overview.address, "pbx.example.lan");
    assert_eq!(overview.identity.firmware, "8.2B");
    assert_eq!(overview.identity.user, "sub-admin");
    assert!(overview.autoswitch.enabled);
    assert_eq!(overview.autoswitch.relay_name, "Relais 1");
    assert_eq!(overview.configurations.len(), 2);
    assert_eq!(
        overview.active_configuration().map(|c| c.name.as_str()),
        Some("Day")
    );
}

// ── Autoswitch ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_enable_twice_writes_once() {
    let (server, pbx) = setup().await;

    // First read: disabled. Every later read: enabled.
    Mock::given(method("GET"))
        .and(path("/config_autoswitch_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(autoswitch("0", "Relais 1")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config_autoswitch_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(autoswitch("1", "Relais 1")))
        .with_priority(5)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/config_autoswitch_save"))
        .and(body_string_contains("switchCfgCb=switchCfgCb"))
        .and(body_string_contains("switchSysRelais=switchSysRelais"))
        .and(body_string_contains("switchSysRelaisName=Relais+1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(pbx.enable_autoswitch().await.unwrap(), Outcome::Applied);
    assert_eq!(pbx.enable_autoswitch().await.unwrap(), Outcome::Unchanged);
}

#[tokio::test]
async fn test_enable_when_already_enabled() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/config_autoswitch_state", json!({
        "switchCfgCb": true,
        "switchSysRelais": false,
        "switchSysRelaisName": ""
    }))
    .await;
    expect_autoswitch_writes(&server, 0).await;

    assert_eq!(pbx.enable_autoswitch().await.unwrap(), Outcome::Unchanged);
}

#[tokio::test]
async fn test_disable_echoes_relay_name() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/config_autoswitch_state", autoswitch("1", "Nachtschaltung")).await;

    Mock::given(method("POST"))
        .and(path("/config_autoswitch_save"))
        .and(body_string_contains("switchSysRelais=switchSysRelais"))
        .and(body_string_contains("switchSysRelaisName=Nachtschaltung"))
        .and(|req: &Request| {
            !String::from_utf8_lossy(&req.body).contains("switchCfgCb")
        })
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(pbx.disable_autoswitch().await.unwrap(), Outcome::Applied);
}

#[tokio::test]
async fn test_disable_when_already_disabled() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/config_autoswitch_state", autoswitch("0", "Relais 1")).await;
    expect_autoswitch_writes(&server, 0).await;

    assert_eq!(pbx.disable_autoswitch().await.unwrap(), Outcome::Unchanged);
}

// ── Configuration selection ─────────────────────────────────────────

#[tokio::test]
async fn test_select_inactive_configuration() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/configs_state", two_configurations()).await;

    Mock::given(method("POST"))
        .and(path("/configs_set"))
        .and(query_param("configId", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(pbx.select_configuration(20).await.unwrap(), Outcome::Applied);
}

#[tokio::test]
async fn test_select_active_configuration() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/configs_state", two_configurations()).await;
    expect_config_writes(&server, 0).await;

    assert_eq!(pbx.select_configuration(10).await.unwrap(), Outcome::Unchanged);
}

#[tokio::test]
async fn test_select_unknown_number() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/configs_state", two_configurations()).await;
    expect_config_writes(&server, 0).await;

    match pbx.select_configuration(99).await {
        Err(CoreError::ConfigurationNotFound { ref number }) => {
            assert_eq!(number, "99");
        }
        other => panic!("expected ConfigurationNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_select_matches_numeric_wire_numbers() {
    let (server, pbx) = setup().await;
    mount_get(&server, "/configs_state", json!({
        "rows": [
            { "id": "a", "data": ["Urlaub", 30], "userdata": { "active": "0" } },
            { "id": "b", "data": ["Normal", 40], "userdata": { "active": "1" } }
        ]
    }))
    .await;

    Mock::given(method("POST"))
        .and(path("/configs_set"))
        .and(query_param("configId", "a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(pbx.select_configuration(30).await.unwrap(), Outcome::Applied);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_maps_to_api_error() {
    let (server, pbx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/configs_state"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    match pbx.select_configuration(10).await {
        Err(CoreError::Api { status, .. }) => assert_eq!(status, Some(503)),
        other => panic!("expected Api error, got: {other:?}"),
    }
}
