//! Polling engine for the remote sensor store
//!
//! One tokio task per running engine drives both the repeating timer and the
//! single outstanding read. Ticks that fire while a read is still in flight
//! are dropped, so published states always follow fetch order. Every
//! publication is checked against an epoch that `stop()` bumps under the
//! same lock, which keeps late results from leaking out after a stop.

use log::{debug, error, info, trace, warn};
use parkwatch_core::{
    BoxedRemoteStore, FetchOutcome, ReadFuture, ReadingMapper, RemoteStore, StoreMetadata,
};
use parkwatch_types::EngineState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Errors returned by [`PollEngine::start`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("polling engine is already running")]
    AlreadyRunning,
    #[error("polling engine must be started from within a tokio runtime")]
    NoRuntime,
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

/// State shared between the engine handle and its polling task
struct Published {
    /// Generation of the currently running task
    epoch: u64,
    state: EngineState,
}

fn lock(published: &Mutex<Published>) -> MutexGuard<'_, Published> {
    published
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Periodically reads the remote store and publishes [`EngineState`]s.
pub struct PollEngine {
    store: Arc<dyn RemoteStore>,
    key: Arc<str>,
    mapper: Arc<ReadingMapper>,
    published: Arc<Mutex<Published>>,
    fetches: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl PollEngine {
    /// Create an idle engine reading `key` from `store`
    pub fn new(store: BoxedRemoteStore, key: impl Into<String>, mapper: ReadingMapper) -> Self {
        let key: String = key.into();
        Self {
            store: Arc::from(store),
            key: Arc::from(key),
            mapper: Arc::new(mapper),
            published: Arc::new(Mutex::new(Published {
                epoch: 0,
                state: EngineState::Loading,
            })),
            fetches: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Start polling.
    ///
    /// `on_state_change` first receives `Loading`, then one state per
    /// completed fetch. The first fetch is issued immediately, the following
    /// ones every `interval`. Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, interval: Duration, on_state_change: F) -> Result<(), EngineError>
    where
        F: FnMut(EngineState) + Send + 'static,
    {
        if self.task.is_some() {
            return Err(EngineError::AlreadyRunning);
        }
        if interval.is_zero() {
            return Err(EngineError::ZeroInterval);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        let epoch = {
            let mut published = lock(&self.published);
            published.epoch += 1;
            published.state = EngineState::Loading;
            published.epoch
        };

        info!(
            "Polling '{}' from {} every {:?} ({} slots)",
            self.key,
            self.store.metadata().location,
            interval,
            self.mapper.slot_count()
        );

        let cycle = FetchCycle {
            store: Arc::clone(&self.store),
            key: Arc::clone(&self.key),
            mapper: Arc::clone(&self.mapper),
            published: Arc::clone(&self.published),
            fetches: Arc::clone(&self.fetches),
            epoch,
            on_state_change,
        };
        self.task = Some(runtime.spawn(cycle.run(interval)));
        Ok(())
    }

    /// Stop polling. Idempotent.
    ///
    /// Once this returns no further state is delivered, including the result
    /// of a fetch that was still in flight. The last published state is kept.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        lock(&self.published).epoch += 1;
        task.abort();
        info!("Stopped polling '{}'", self.key);
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Point-in-time copy of the last published state
    pub fn current_state(&self) -> EngineState {
        lock(&self.published).state.clone()
    }

    /// Number of fetches issued since the engine was created
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mapper(&self) -> &ReadingMapper {
        &self.mapper
    }

    pub fn store_metadata(&self) -> &StoreMetadata {
        self.store.metadata()
    }
}

impl Drop for PollEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Turn a fetch outcome into the state to publish.
///
/// Transport reasons are logged here and never reach subscribers.
pub fn reconcile(outcome: FetchOutcome, mapper: &ReadingMapper, key: &str) -> EngineState {
    match outcome {
        FetchOutcome::Success(raw) if raw.is_empty() => {
            warn!("'{}' holds an empty object", key);
            EngineState::no_data()
        }
        FetchOutcome::Success(raw) => EngineState::Ready(mapper.map(&raw)),
        FetchOutcome::Empty => {
            warn!("No data stored at '{}'", key);
            EngineState::no_data()
        }
        FetchOutcome::Failure(reason) => {
            error!("Fetch of '{}' failed: {}", key, reason);
            EngineState::fetch_failed()
        }
    }
}

/// A read that has been issued but not yet resolved
struct InFlight<'a> {
    future: ReadFuture<'a>,
    started: Instant,
}

/// Resolve the outstanding read, or wait forever if there is none
async fn settle(in_flight: &mut Option<InFlight<'_>>) -> (FetchOutcome, Duration) {
    match in_flight {
        Some(fetch) => {
            let outcome = (&mut fetch.future).await;
            (outcome, fetch.started.elapsed())
        }
        None => std::future::pending().await,
    }
}

/// Body of the polling task for one epoch
struct FetchCycle<F> {
    store: Arc<dyn RemoteStore>,
    key: Arc<str>,
    mapper: Arc<ReadingMapper>,
    published: Arc<Mutex<Published>>,
    fetches: Arc<AtomicU64>,
    epoch: u64,
    on_state_change: F,
}

impl<F> FetchCycle<F>
where
    F: FnMut(EngineState) + Send + 'static,
{
    async fn run(mut self, period: Duration) {
        if !self.publish(EngineState::Loading) {
            return;
        }

        let store = Arc::clone(&self.store);
        let key = Arc::clone(&self.key);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight: Option<InFlight<'_>> = None;

        loop {
            tokio::select! {
                biased;

                (outcome, elapsed) = settle(&mut in_flight) => {
                    in_flight = None;
                    trace!("Fetch of '{}' settled after {:?}", key, elapsed);
                    let state = reconcile(outcome, &self.mapper, &key);
                    if !self.publish(state) {
                        return;
                    }
                }

                _ = ticker.tick() => {
                    if in_flight.is_some() {
                        debug!("Skipping tick for '{}': previous fetch still in flight", key);
                        continue;
                    }
                    self.fetches.fetch_add(1, Ordering::Relaxed);
                    in_flight = Some(InFlight {
                        future: store.read(&key),
                        started: Instant::now(),
                    });
                }
            }
        }
    }

    /// Publish `state` if this cycle is still current.
    ///
    /// The subscriber runs under the lock so `stop()` cannot return while a
    /// delivery is in progress. Returns false once the cycle is stale.
    fn publish(&mut self, state: EngineState) -> bool {
        let mut published = lock(&self.published);
        if published.epoch != self.epoch {
            debug!("Discarding stale result for '{}'", self.key);
            return false;
        }
        published.state = state.clone();
        (self.on_state_change)(state);
        true
    }
}
