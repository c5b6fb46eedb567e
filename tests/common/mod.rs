//! Common test utilities for E2E tests

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use driftpub::{AppState, config};
use http::{HeaderMap, Method, StatusCode, Uri};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub temp_dir: TempDir,
    pub client: reqwest::Client,
}

/// Domain configured for the test instance
pub const TEST_DOMAIN: &str = "test.example.com";

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        // Scratch directory for the request log and icon file
        let temp_dir = TempDir::new().unwrap();

        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
                domain: TEST_DOMAIN.to_string(),
                protocol: "https".to_string(),
            },
            actor: config::ActorConfig {
                display_name: "Test User".to_string(),
                summary: "<p>Test account</p>".to_string(),
                public_key_pem: String::new(),
                icon_path: temp_dir.path().join("icon.png"),
            },
            federation: config::FederationConfig {
                delivery_timeout_seconds: 5,
            },
            request_log: config::RequestLogConfig {
                enabled: true,
                path: temp_dir.path().join("request.log"),
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        // Initialize app state
        let state = AppState::new(config).unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = driftpub::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Canonical actor URI for a username on the test domain
    pub fn actor_uri(&self, username: &str) -> String {
        format!("https://{}/@{}", TEST_DOMAIN, username)
    }

    /// Path of the NDJSON request log
    pub fn request_log_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("request.log")
    }

    /// Write the shared avatar file served by the icon endpoint
    pub async fn write_icon(&self, bytes: &[u8]) {
        tokio::fs::write(self.temp_dir.path().join("icon.png"), bytes)
            .await
            .unwrap();
    }
}

/// A request observed by the mock peer
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct PeerState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A fake remote federation server
///
/// Records every request it receives and answers with a fixed status,
/// so tests can observe the Accept handshake from the remote side.
pub struct MockPeer {
    pub addr: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockPeer {
    /// Start a peer that answers every request with `status`
    pub async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let peer_state = PeerState {
            status,
            requests: requests.clone(),
        };

        let app = Router::new().fallback(record_request).with_state(peer_state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    /// URI of a remote actor living on this peer
    pub fn actor_uri(&self, username: &str) -> String {
        format!("{}/users/{}", self.addr, username)
    }

    /// Snapshot of all requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record_request(
    State(state): State<PeerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };

    state.requests.lock().unwrap().push(request);
    state.status
}
