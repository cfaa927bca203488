//! Local fixture store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_fixture_path() -> PathBuf {
    PathBuf::from("parking-fixture.json")
}

/// Fixture store configuration
///
/// The file is re-read on every poll so it can be edited while running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureStoreConfig {
    #[serde(default = "default_fixture_path")]
    pub path: PathBuf,
}

impl Default for FixtureStoreConfig {
    fn default() -> Self {
        Self {
            path: default_fixture_path(),
        }
    }
}
