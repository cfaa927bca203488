//! parkwatch-core: Core traits and registry for parkwatch.
//!
//! This crate contains the `RemoteStore` trait, the reading mapper that
//! turns raw sensor fields into slot snapshots, the global store
//! `Registry`, and shared constants.

pub mod constants;
mod mapper;
mod registry;
mod remote_store;

pub use constants::{
    DEFAULT_CLOCK_INTERVAL, DEFAULT_POLL_INTERVAL, DEFAULT_REMOTE_KEY, DEFAULT_SLOT_FIELDS,
};
pub use mapper::ReadingMapper;
pub use registry::{
    global_registry, global_registry_mut, Registry, StoreFactory, StoreInfo,
};
pub use remote_store::{BoxedRemoteStore, ReadFuture, RemoteStore, StoreMetadata};

// Re-export types used in trait signatures for convenience
pub use parkwatch_types::{EngineState, FetchOutcome, RawSnapshot, SlotState, Snapshot, StoreConfig};
