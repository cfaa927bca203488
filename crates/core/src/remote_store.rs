//! Remote store trait and related types

use parkwatch_types::{FetchOutcome, StoreConfig};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Metadata about a remote store backend
#[derive(Debug, Clone)]
pub struct StoreMetadata {
    /// Unique identifier for this store type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Where reads are served from (URL, file path, ...)
    pub location: String,
    /// Transport timeout enforced by the store, if any
    pub request_timeout: Option<Duration>,
}

/// Future returned by [`RemoteStore::read`]
pub type ReadFuture<'a> = Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>>;

/// Trait for all remote stores
///
/// A store answers a single question: what is currently stored at a key.
/// Implementations enforce their own transport timeout and never panic;
/// every failure is reported as [`FetchOutcome::Failure`].
pub trait RemoteStore: Send + Sync {
    /// Get metadata about this store
    fn metadata(&self) -> &StoreMetadata;

    /// Read the snapshot stored at `key`
    fn read<'a>(&'a self, key: &'a str) -> ReadFuture<'a>;

    /// Get the typed configuration this store was built from (if available)
    fn get_typed_config(&self) -> Option<StoreConfig> {
        None
    }
}

/// Type-erased store for dynamic dispatch
pub type BoxedRemoteStore = Box<dyn RemoteStore>;
