// End-to-end tests: the service talking to a mock historian engine over HTTP.
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use historian_core::config::HistorianConfig;
use historian_protocol::alertstate::QueryResponse;
use historian_protocol::frame::{Field, Frame};
use historian_service::{start_service, RemoteHistorian};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone, Default)]
struct EngineState {
    captured: Arc<Mutex<Vec<(i64, Value)>>>,
}

struct MockEngine {
    addr: SocketAddr,
    state: EngineState,
    shutdown: oneshot::Sender<()>,
}

async fn spawn_engine(frame: Option<Frame>) -> anyhow::Result<MockEngine> {
    let state = EngineState::default();
    let frame = Arc::new(frame);

    let handler_state = state.clone();
    let router = Router::new().route(
        "/api/v1/orgs/:org_id/alert-state-history/query",
        post(
            move |State(engine): State<EngineState>,
                  Path(org_id): Path<i64>,
                  Json(query): Json<Value>| {
                let frame = frame.clone();
                async move {
                    engine.captured.lock().unwrap().push((org_id, query));
                    match frame.as_ref() {
                        Some(frame) => Ok(Json(frame.clone())),
                        None => Err((StatusCode::SERVICE_UNAVAILABLE, "loki unavailable")),
                    }
                }
            },
        ),
    )
    .with_state(handler_state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await
            .ok();
    });

    Ok(MockEngine {
        addr,
        state,
        shutdown: tx,
    })
}

fn service_config() -> HistorianConfig {
    HistorianConfig {
        http_bind: "127.0.0.1:0".to_string(),
        ..HistorianConfig::default()
    }
}

async fn post_query(addr: SocketAddr, org_id: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{}/v1/alertstate/query", addr))
        .header("X-User-ID", "user-1")
        .header("X-Org-ID", org_id)
        .json(&body)
        .send()
        .await
        .expect("request succeeds")
}

#[tokio::test]
async fn forwards_query_and_projects_engine_frame() {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let frame = Frame::new("history")
        .with_field(Field::times("Time", [t0, t0 + chrono::Duration::seconds(1)]))
        .with_field(Field::strings("Line", ["alert fired", "alert resolved"]));
    let engine = spawn_engine(Some(frame)).await.expect("engine started");

    let historian =
        RemoteHistorian::new(&format!("http://{}", engine.addr)).expect("valid engine url");
    let service = start_service(&service_config(), Arc::new(historian))
        .await
        .expect("service started");

    let response = post_query(
        service.addr,
        "42",
        json!({"ruleUID": "rule-123", "from": 1000, "labels": {"env": "prod"}}),
    )
    .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: QueryResponse = response.json().await.expect("json body");
    assert_eq!(body.entries.len(), 2);
    assert_eq!(body.entries[0].timestamp, t0.timestamp_nanos_opt().unwrap());
    assert_eq!(body.entries[1].line, "alert resolved");

    let captured = engine.state.captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    let (org_id, query) = &captured[0];
    assert_eq!(*org_id, 42);
    assert_eq!(query["orgId"], 42);
    assert_eq!(query["ruleUID"], "rule-123");
    assert_eq!(query["dashboardUID"], "");
    assert_eq!(query["labels"]["env"], "prod");

    service.shutdown();
    let _ = engine.shutdown.send(());
}

#[tokio::test]
async fn engine_failure_is_internal_error() {
    let engine = spawn_engine(None).await.expect("engine started");
    let historian =
        RemoteHistorian::new(&format!("http://{}", engine.addr)).expect("valid engine url");
    let service = start_service(&service_config(), Arc::new(historian))
        .await
        .expect("service started");

    let response = post_query(service.addr, "1", json!({})).await;

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["code"], 500);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("loki unavailable"));

    service.shutdown();
    let _ = engine.shutdown.send(());
}

#[tokio::test]
async fn malformed_engine_frame_is_rejected() {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let frame = Frame::new("history").with_field(Field::times("Time", [t0]));
    let engine = spawn_engine(Some(frame)).await.expect("engine started");
    let historian =
        RemoteHistorian::new(&format!("http://{}", engine.addr)).expect("valid engine url");
    let service = start_service(&service_config(), Arc::new(historian))
        .await
        .expect("service started");

    let response = post_query(service.addr, "1", json!({})).await;

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body["message"],
        "no Line field found in historian query response"
    );

    service.shutdown();
    let _ = engine.shutdown.send(());
}
