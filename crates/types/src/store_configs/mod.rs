//! Store configuration types for all remote store backends.

pub mod firebase;
pub mod fixture;

pub use firebase::FirebaseStoreConfig;
pub use fixture::FixtureStoreConfig;

use serde::{Deserialize, Serialize};

/// Type-safe enum for all store configurations.
/// Uses serde tag for JSON serialization: {"store_type": "firebase", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "store_type")]
pub enum StoreConfig {
    #[serde(rename = "firebase")]
    Firebase(FirebaseStoreConfig),

    #[serde(rename = "fixture")]
    Fixture(FixtureStoreConfig),
}

impl StoreConfig {
    /// Get the store type ID string
    pub fn store_type(&self) -> &'static str {
        match self {
            StoreConfig::Firebase(_) => "firebase",
            StoreConfig::Fixture(_) => "fixture",
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Firebase(FirebaseStoreConfig::default())
    }
}
