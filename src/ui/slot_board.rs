//! Terminal slot board
//!
//! Purely reactive: renders whatever state it is handed.

use crate::config::DisplayConfig;
use parkwatch_types::{EngineState, SlotState, Snapshot};
use std::fmt::Write as _;
use std::io::{self, Write};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const ERROR_RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Shown when a snapshot has no slots configured
pub const NO_SLOTS_MESSAGE: &str = "No parking slot data available";

/// Renders engine states as text
#[derive(Debug, Clone)]
pub struct SlotBoard {
    title: String,
    footer: String,
    color: bool,
}

impl SlotBoard {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            title: display.title.clone(),
            footer: display.footer.clone(),
            color: display.color,
        }
    }

    /// Build the full board text for `state`
    pub fn render(&self, state: &EngineState, clock: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}  {}", self.title, clock);
        out.push('\n');

        match state {
            EngineState::Loading => out.push_str("Loading...\n"),
            EngineState::Error(message) => {
                let _ = writeln!(out, "{}", self.paint(ERROR_RED, message));
            }
            EngineState::Ready(snapshot) => self.render_slots(&mut out, snapshot),
        }

        out.push('\n');
        out.push_str(&self.footer);
        out.push('\n');
        out
    }

    fn render_slots(&self, out: &mut String, snapshot: &Snapshot) {
        if snapshot.is_empty() {
            let _ = writeln!(out, "{}", NO_SLOTS_MESSAGE);
            return;
        }

        for (index, state) in snapshot.iter() {
            let colour = match state {
                SlotState::Available => GREEN,
                SlotState::Occupied => RED,
            };
            let line = format!("Slot {}: {}", index + 1, state);
            let _ = writeln!(out, "{}", self.paint(colour, &line));
        }
        let _ = writeln!(
            out,
            "{} of {} slots available",
            snapshot.available_count(),
            snapshot.len()
        );
    }

    fn paint(&self, colour: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", colour, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Clear the terminal and draw the board
    pub fn draw(&self, state: &EngineState, clock: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}{}", CLEAR_SCREEN, self.render(state, clock))?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_board() -> SlotBoard {
        SlotBoard::new(&DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn test_render_ready() {
        let snapshot = Snapshot::from(vec![
            SlotState::Available,
            SlotState::Occupied,
            SlotState::Available,
            SlotState::Occupied,
        ]);
        let text = plain_board().render(&EngineState::Ready(snapshot), "12:00:00");

        assert!(text.starts_with("Parking Slot Status  12:00:00\n"));
        assert!(text.contains("Slot 1: Available\n"));
        assert!(text.contains("Slot 4: Occupied\n"));
        assert!(text.contains("2 of 4 slots available"));
        assert!(text.trim_end().ends_with("All Rights Reserved."));
    }

    #[test]
    fn test_render_loading_and_error() {
        let board = plain_board();
        assert!(board.render(&EngineState::Loading, "t").contains("Loading..."));

        let text = board.render(&EngineState::fetch_failed(), "t");
        assert!(text.contains("Failed to fetch data"));
        assert!(!text.contains("Slot 1"));
    }

    #[test]
    fn test_render_without_slots() {
        let text = plain_board().render(&EngineState::Ready(Snapshot::default()), "t");
        assert!(text.contains(NO_SLOTS_MESSAGE));
    }

    #[test]
    fn test_colour_codes() {
        let board = SlotBoard::new(&DisplayConfig::default());
        let text = board.render(&EngineState::Ready(Snapshot::from(vec![SlotState::Available])), "t");
        assert!(text.contains("\x1b[32mSlot 1: Available\x1b[0m"));
    }
}
