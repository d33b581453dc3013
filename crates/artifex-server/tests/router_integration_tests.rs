mod common;

use common::demo_state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use artifex_core::errors::Result;
use artifex_server::registry::{ActionHandler, ActionRequest};
use artifex_server::{actions, ActionRegistry, AppState, Server, ServerConfig};

/// Handler that blocks its worker; used to exercise the timeout path
struct SleepHandler {
    millis: u64,
}

impl ActionHandler for SleepHandler {
    fn handle(&self, _state: &AppState, _request: &ActionRequest) -> Result<serde_json::Value> {
        std::thread::sleep(std::time::Duration::from_millis(self.millis));
        Ok(serde_json::json!({ "slept": self.millis }))
    }
}

/// Handler that panics; the router must convert this to an error response
struct PanicHandler;

impl ActionHandler for PanicHandler {
    fn handle(&self, _state: &AppState, _request: &ActionRequest) -> Result<serde_json::Value> {
        panic!("handler exploded");
    }
}

async fn start_server(config: ServerConfig) -> SocketAddr {
    let (_backend, state) = demo_state(&config);

    let mut registry = ActionRegistry::new();
    actions::register_all(&mut registry);
    registry.register("Sleep", Arc::new(SleepHandler { millis: 400 }));
    registry.register("Explode", Arc::new(PanicHandler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = Server::with_registry(config, state, registry);
    tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });
    addr
}

struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer,
        }
    }

    async fn send_raw(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
    }

    async fn send(&mut self, request: serde_json::Value) {
        self.send_raw(&request.to_string()).await;
    }

    async fn recv(&mut self) -> serde_json::Value {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        assert!(!line.is_empty(), "connection closed unexpectedly");
        serde_json::from_str(&line).unwrap()
    }
}

// ===== CORRELATION =====

#[tokio::test(flavor = "multi_thread")]
async fn test_ping_is_correlated() {
    let addr = start_server(ServerConfig::default()).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send(serde_json::json!({"id": "p-1", "action": "Ping"}))
        .await;
    let response = client.recv().await;

    assert_eq!(response["id"], "p-1");
    assert_eq!(response["success"], serde_json::json!(true));
    assert_eq!(response["data"]["pong"], serde_json::json!(true));
    assert!(response["processingTimeMs"].is_number());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_two_connections_do_not_cross_talk() {
    let addr = start_server(ServerConfig::default()).await;
    let mut a = TestClient::connect(addr).await;
    let mut b = TestClient::connect(addr).await;

    let (ra, rb) = tokio::join!(
        async {
            a.send(serde_json::json!({"id": "conn-a", "action": "Ping"}))
                .await;
            a.recv().await
        },
        async {
            b.send(serde_json::json!({"id": "conn-b", "action": "Ping"}))
                .await;
            b.recv().await
        }
    );

    assert_eq!(ra["id"], "conn-a");
    assert_eq!(rb["id"], "conn-b");
    assert_eq!(ra["success"], serde_json::json!(true));
    assert_eq!(rb["success"], serde_json::json!(true));
}

// ===== FAILURE PATHS KEEP THE CONNECTION USABLE =====

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_action_keeps_connection_usable() {
    let addr = start_server(ServerConfig::default()).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send(serde_json::json!({"id": "u-1", "action": "Frobnicate"}))
        .await;
    let response = client.recv().await;
    assert_eq!(response["id"], "u-1");
    assert_eq!(response["success"], serde_json::json!(false));
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("Unknown action"));

    client
        .send(serde_json::json!({"id": "u-2", "action": "Ping"}))
        .await;
    let follow_up = client.recv().await;
    assert_eq!(follow_up["id"], "u-2");
    assert_eq!(follow_up["success"], serde_json::json!(true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_line_yields_error_response() {
    let addr = start_server(ServerConfig::default()).await;
    let mut client = TestClient::connect(addr).await;

    client.send_raw("this is not json").await;
    let response = client.recv().await;
    assert_eq!(response["success"], serde_json::json!(false));
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("malformed request"));

    client
        .send(serde_json::json!({"id": "m-2", "action": "Ping"}))
        .await;
    let follow_up = client.recv().await;
    assert_eq!(follow_up["id"], "m-2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_panicking_handler_becomes_error_response() {
    let addr = start_server(ServerConfig::default()).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send(serde_json::json!({"id": "x-1", "action": "Explode"}))
        .await;
    let response = client.recv().await;
    assert_eq!(response["id"], "x-1");
    assert_eq!(response["success"], serde_json::json!(false));

    // The router survived
    client
        .send(serde_json::json!({"id": "x-2", "action": "Ping"}))
        .await;
    let follow_up = client.recv().await;
    assert_eq!(follow_up["success"], serde_json::json!(true));
}

// ===== TIMEOUT / INDEPENDENCE =====

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_handler_times_out_and_fast_sibling_completes() {
    let config = ServerConfig {
        response_timeout_ms: 80,
        ..ServerConfig::default()
    };
    let addr = start_server(config).await;
    let mut client = TestClient::connect(addr).await;

    // Slow request first, fast request immediately after, same connection
    client
        .send(serde_json::json!({"id": "slow", "action": "Sleep"}))
        .await;
    client
        .send(serde_json::json!({"id": "fast", "action": "Ping"}))
        .await;

    // The fast request is not blocked behind the slow one
    let first = client.recv().await;
    assert_eq!(first["id"], "fast");
    assert_eq!(first["success"], serde_json::json!(true));

    // The slow request is abandoned at the deadline
    let second = client.recv().await;
    assert_eq!(second["id"], "slow");
    assert_eq!(second["success"], serde_json::json!(false));
    assert!(second["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_actions_work_over_the_wire() {
    let addr = start_server(ServerConfig::default()).await;
    let mut client = TestClient::connect(addr).await;

    client
        .send(serde_json::json!({
            "id": "w-1",
            "action": "CreateObject",
            "objectType": "Widget",
            "parameters": {"name": "w1"},
        }))
        .await;
    let created = client.recv().await;
    assert_eq!(created["success"], serde_json::json!(true), "{:?}", created);

    client
        .send(serde_json::json!({
            "id": "w-2",
            "action": "InspectObject",
            "objectType": "Widget",
            "parameters": {"name": "w1", "mode": "summary"},
        }))
        .await;
    let inspected = client.recv().await;
    assert_eq!(inspected["success"], serde_json::json!(true));
    assert_eq!(inspected["data"]["found"], serde_json::json!(true));
}
