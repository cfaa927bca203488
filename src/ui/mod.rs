//! Terminal presentation of the engine state

mod clock_display;
mod slot_board;

pub use clock_display::{clock_label, now_label, CLOCK_FORMAT};
pub use slot_board::{SlotBoard, NO_SLOTS_MESSAGE};
