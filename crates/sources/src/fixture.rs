//! Fixture store: serves sensor readings from a local JSON file
//!
//! Useful for demos and bench setups without network access. The file is
//! read again on every poll, so editing it changes the board live.

use anyhow::Result;
use parkwatch_core::{FetchOutcome, ReadFuture, RemoteStore, StoreConfig, StoreMetadata};
use parkwatch_types::FixtureStoreConfig;
use serde_json::Value;

/// Local JSON file store
pub struct FixtureStore {
    metadata: StoreMetadata,
    config: FixtureStoreConfig,
}

impl FixtureStore {
    pub fn new(config: FixtureStoreConfig) -> Self {
        let metadata = StoreMetadata {
            id: "fixture".to_string(),
            name: "Fixture File".to_string(),
            location: config.path.display().to_string(),
            request_timeout: None,
        };

        Self { metadata, config }
    }

    async fn fetch(&self, key: &str) -> FetchOutcome {
        let content = match tokio::fs::read_to_string(&self.config.path).await {
            Ok(content) => content,
            Err(e) => {
                return FetchOutcome::Failure(format!(
                    "cannot read {}: {}",
                    self.config.path.display(),
                    e
                ))
            }
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                return FetchOutcome::Failure(format!(
                    "invalid JSON in {}: {}",
                    self.config.path.display(),
                    e
                ))
            }
        };

        FetchOutcome::from_json(select_node(document, key))
    }
}

/// A fixture may hold the node itself or a whole database export keyed by
/// node name.
fn select_node(document: Value, key: &str) -> Value {
    match document {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

impl RemoteStore for FixtureStore {
    fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    fn read<'a>(&'a self, key: &'a str) -> ReadFuture<'a> {
        Box::pin(self.fetch(key))
    }

    fn get_typed_config(&self) -> Option<StoreConfig> {
        Some(StoreConfig::Fixture(self.config.clone()))
    }
}

pub(crate) fn create(config: &StoreConfig) -> Result<parkwatch_core::BoxedRemoteStore> {
    match config {
        StoreConfig::Fixture(fixture) => Ok(Box::new(FixtureStore::new(fixture.clone()))),
        other => anyhow::bail!("fixture factory cannot build a '{}' store", other.store_type()),
    }
}
