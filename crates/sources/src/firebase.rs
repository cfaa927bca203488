//! Firebase Realtime Database store
//!
//! Reads a node through the database's REST interface
//! (`GET {database_url}/{key}.json`).

use anyhow::{bail, Context, Result};
use parkwatch_core::{FetchOutcome, ReadFuture, RemoteStore, StoreConfig, StoreMetadata};
use parkwatch_types::FirebaseStoreConfig;
use serde_json::Value;
use std::time::Duration;

/// Firebase REST store
pub struct FirebaseStore {
    metadata: StoreMetadata,
    config: FirebaseStoreConfig,
    base_url: String,
    client: reqwest::Client,
}

impl FirebaseStore {
    pub fn new(config: FirebaseStoreConfig) -> Result<Self> {
        let base_url = config.database_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            bail!("Firebase database_url is not configured");
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("Firebase database_url must be an http(s) URL, got '{}'", base_url);
        }

        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let metadata = StoreMetadata {
            id: "firebase".to_string(),
            name: "Firebase Realtime Database".to_string(),
            location: base_url.clone(),
            request_timeout: Some(timeout),
        };

        Ok(Self {
            metadata,
            config,
            base_url,
            client,
        })
    }

    /// REST URL of a database node
    pub fn node_url(&self, key: &str) -> String {
        format!("{}/{}.json", self.base_url, key.trim_matches('/'))
    }

    async fn fetch(&self, key: &str) -> FetchOutcome {
        let url = self.node_url(key);
        log::trace!("GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failure(describe_error(&e, &self.metadata)),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Failure(format!("HTTP {} from {}", status, url));
        }

        match response.json::<Value>().await {
            Ok(value) => FetchOutcome::from_json(value),
            Err(e) => FetchOutcome::Failure(describe_error(&e, &self.metadata)),
        }
    }
}

fn describe_error(error: &reqwest::Error, metadata: &StoreMetadata) -> String {
    if error.is_timeout() {
        match metadata.request_timeout {
            Some(timeout) => format!("request timed out after {:?}", timeout),
            None => "request timed out".to_string(),
        }
    } else if error.is_decode() {
        format!("invalid response body: {}", error)
    } else {
        error.to_string()
    }
}

impl RemoteStore for FirebaseStore {
    fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    fn read<'a>(&'a self, key: &'a str) -> ReadFuture<'a> {
        Box::pin(self.fetch(key))
    }

    fn get_typed_config(&self) -> Option<StoreConfig> {
        Some(StoreConfig::Firebase(self.config.clone()))
    }
}

pub(crate) fn create(config: &StoreConfig) -> Result<parkwatch_core::BoxedRemoteStore> {
    match config {
        StoreConfig::Firebase(firebase) => Ok(Box::new(FirebaseStore::new(firebase.clone())?)),
        other => bail!("firebase factory cannot build a '{}' store", other.store_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a random local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    fn store_for(url: String, timeout_ms: u64) -> FirebaseStore {
        FirebaseStore::new(FirebaseStoreConfig {
            database_url: url,
            request_timeout_ms: timeout_ms,
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_missing_url() {
        assert!(FirebaseStore::new(FirebaseStoreConfig::default()).is_err());
        assert!(FirebaseStore::new(FirebaseStoreConfig {
            database_url: "ftp://db".to_string(),
            request_timeout_ms: 100,
        })
        .is_err());
    }

    #[test]
    fn test_node_url() {
        let store = store_for("https://demo-default-rtdb.firebaseio.com/".to_string(), 100);
        assert_eq!(
            store.node_url("esp32-0DA710"),
            "https://demo-default-rtdb.firebaseio.com/esp32-0DA710.json"
        );
        assert_eq!(
            store.node_url("/lots/north/"),
            "https://demo-default-rtdb.firebaseio.com/lots/north.json"
        );
    }

    #[tokio::test]
    async fn test_reads_object_node() {
        let url = serve_once("200 OK", r#"{"ir_sen1":1,"ir_sen2":0}"#).await;
        let store = store_for(url, 2_000);

        match store.read("esp32-0DA710").await {
            FetchOutcome::Success(raw) => {
                assert_eq!(raw.len(), 2);
                assert_eq!(raw.get("ir_sen1"), Some(&serde_json::json!(1)));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_null_node_is_empty() {
        let url = serve_once("200 OK", "null").await;
        let store = store_for(url, 2_000);
        assert_eq!(store.read("missing").await, FetchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_http_error_is_failure() {
        let url = serve_once("401 Unauthorized", r#"{"error":"Permission denied"}"#).await;
        let store = store_for(url, 2_000);

        match store.read("esp32-0DA710").await {
            FetchOutcome::Failure(reason) => assert!(reason.contains("401"), "{}", reason),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let store = store_for(format!("http://{}", addr), 50);
        match store.read("esp32-0DA710").await {
            FetchOutcome::Failure(reason) => assert!(reason.contains("timed out"), "{}", reason),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
