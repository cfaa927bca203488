//! Header clock
//!
//! Refreshes on its own interval, unrelated to data polling.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Time format used in the header
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Format a timestamp for the header
pub fn clock_label<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(CLOCK_FORMAT).to_string()
}

/// Current local time for the header
pub fn now_label() -> String {
    clock_label(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_clock_label() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(clock_label(&time), "07:05:42");
    }
}
