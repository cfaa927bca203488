//! parkwatch: live parking slot occupancy board
//!
//! This library provides the pieces behind the `parkwatch` binary:
//! - The polling engine that reads the remote sensor store and publishes
//!   Loading/Ready/Error states
//! - Configuration management
//! - A terminal board that renders the published state

pub mod config;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::{EngineError, PollEngine};
pub use parkwatch_types::{EngineState, SlotState, Snapshot};
