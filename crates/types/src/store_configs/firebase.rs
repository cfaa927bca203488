//! Firebase Realtime Database store configuration.

use serde::{Deserialize, Serialize};

fn default_request_timeout() -> u64 {
    10_000
}

/// Firebase REST store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirebaseStoreConfig {
    /// Database root, e.g. `https://<project>-default-rtdb.firebaseio.com`.
    /// Empty until configured.
    #[serde(default)]
    pub database_url: String,
    /// Transport timeout for a single read in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for FirebaseStoreConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}
