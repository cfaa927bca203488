//! parkwatch-types: Shared data types for the parkwatch occupancy board.
//!
//! This crate contains pure data types (slot states, snapshots, fetch
//! outcomes, engine state and store configs) shared by every other crate.
//! It has no runtime or I/O dependencies.

pub mod engine_state;
pub mod fetch;
pub mod slot;
pub mod store_configs;

// Re-export commonly used types at the crate root for convenience
pub use engine_state::{EngineState, FETCH_FAILED_MESSAGE, NO_DATA_MESSAGE};
pub use fetch::{FetchOutcome, RawSnapshot};
pub use slot::{SlotIndex, SlotState, Snapshot};
pub use store_configs::{FirebaseStoreConfig, FixtureStoreConfig, StoreConfig};
