//! Debug request log
//!
//! Appends one JSON record per inbound inbox request to a local file,
//! for protocol debugging against real federation peers. The log is a
//! side channel: every failure here is swallowed so it can never
//! affect request processing.

use chrono::Utc;
use http::HeaderMap;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::RequestLogConfig;

/// NDJSON request log with serialized appends
///
/// Concurrent handlers share one logical log file; the mutex is held
/// only for the duration of a single append so records never
/// interleave.
pub struct RequestLog {
    config: RequestLogConfig,
    write_lock: Mutex<()>,
}

impl RequestLog {
    pub fn new(config: RequestLogConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Record a decoded request body
    pub async fn record(&self, method: &str, path: &str, headers: &HeaderMap, body: &Value) {
        self.append(method, path, headers, body.clone()).await;
    }

    /// Record a body that failed to decode, as a raw string
    pub async fn record_raw(&self, method: &str, path: &str, headers: &HeaderMap, body: &[u8]) {
        let raw = String::from_utf8_lossy(body).into_owned();
        self.append(method, path, headers, Value::String(raw)).await;
    }

    async fn append(&self, method: &str, path: &str, headers: &HeaderMap, body: Value) {
        if !self.config.enabled {
            return;
        }

        let record = serde_json::json!({
            "datetime": Utc::now().to_rfc3339(),
            "method": method,
            "path": path,
            "headers": headers_to_json(headers),
            "body": body,
        });

        let mut line = record.to_string();
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.config.path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(error) = result {
            tracing::debug!(%error, path = %self.config.path.display(), "request log append failed");
        }
    }
}

fn headers_to_json(headers: &HeaderMap) -> Value {
    let mut map = serde_json::Map::new();
    for key in headers.keys() {
        let values: Vec<Value> = headers
            .get_all(key)
            .iter()
            .map(|value| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect();
        map.insert(key.as_str().to_string(), Value::Array(values));
    }
    Value::Object(map)
}
