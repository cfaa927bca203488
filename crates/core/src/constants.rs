//! Shared constants for the application

use std::time::Duration;

/// Default interval between remote reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Default refresh interval of the header clock
pub const DEFAULT_CLOCK_INTERVAL: Duration = Duration::from_millis(1000);

/// Remote key written by the reference sensor controller
pub const DEFAULT_REMOTE_KEY: &str = "esp32-0DA710";

/// Sensor fields of the reference four-slot deployment, in slot order
pub const DEFAULT_SLOT_FIELDS: [&str; 4] = ["ir_sen1", "ir_sen2", "ir_sen3", "ir_sen4"];
