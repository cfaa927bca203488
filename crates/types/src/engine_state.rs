//! Published state of the polling engine

use crate::slot::Snapshot;
use serde::{Deserialize, Serialize};

/// Message published when the remote key holds no data
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Message published when the store could not be reached or decoded
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// The single externally observable state of the polling engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum EngineState {
    /// Initial state, only ever published once per start
    #[default]
    Loading,
    /// Last fetch produced a snapshot
    Ready(Snapshot),
    /// Last fetch failed or returned nothing
    Error(String),
}

impl EngineState {
    pub fn no_data() -> Self {
        EngineState::Error(NO_DATA_MESSAGE.to_string())
    }

    pub fn fetch_failed() -> Self {
        EngineState::Error(FETCH_FAILED_MESSAGE.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EngineState::Loading)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            EngineState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            EngineState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotState;

    #[test]
    fn test_engine_state_accessors() {
        assert!(EngineState::default().is_loading());
        assert_eq!(EngineState::no_data().error_message(), Some("No data available"));
        assert_eq!(EngineState::fetch_failed().error_message(), Some("Failed to fetch data"));

        let ready = EngineState::Ready(Snapshot::from(vec![SlotState::Occupied]));
        assert_eq!(ready.snapshot().map(|s| s.len()), Some(1));
        assert!(ready.error_message().is_none());
    }

    #[test]
    fn test_engine_state_serialization() {
        let json = serde_json::to_string(&EngineState::no_data()).unwrap();
        assert_eq!(json, r#"{"status":"error","data":"No data available"}"#);

        let back: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EngineState::no_data());
    }
}
