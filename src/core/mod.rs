//! Polling engine and re-exports of the core traits

mod poll_engine;

pub use parkwatch_core::{
    global_registry, BoxedRemoteStore, ReadingMapper, RemoteStore, StoreMetadata,
};
pub use poll_engine::{reconcile, EngineError, PollEngine};
