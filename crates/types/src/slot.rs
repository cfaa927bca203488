//! Slot occupancy types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Position of a physical slot, zero-based.
pub type SlotIndex = usize;

/// Occupancy of a single parking slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Available,
    Occupied,
}

impl SlotState {
    /// Derive a slot state from a raw sensor value.
    ///
    /// Only a numeric `1` (integer or float) means the slot is free. Missing
    /// fields, `null`, `0`, strings, booleans and every other value read as
    /// occupied.
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) if n.as_f64() == Some(1.0) => SlotState::Available,
            _ => SlotState::Occupied,
        }
    }

    pub fn is_available(self) -> bool {
        self == SlotState::Available
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            SlotState::Available => "Available",
            SlotState::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One consistent, ordered read of every slot sensor.
///
/// Snapshots are immutable once built; consumers only get read access.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    slots: Vec<SlotState>,
}

impl Snapshot {
    pub fn new(slots: Vec<SlotState>) -> Self {
        Self { slots }
    }

    /// Slot states in slot order
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    pub fn get(&self, index: SlotIndex) -> Option<SlotState> {
        self.slots.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over `(index, state)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, SlotState)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    /// Number of free slots
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_available()).count()
    }
}

impl From<Vec<SlotState>> for Snapshot {
    fn from(slots: Vec<SlotState>) -> Self {
        Self::new(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_numeric_one_is_available() {
        assert_eq!(SlotState::from_raw(Some(&json!(1))), SlotState::Available);
        assert_eq!(SlotState::from_raw(Some(&json!(1.0))), SlotState::Available);

        for value in [json!(0), json!(2), json!(-1), json!(0.5), json!("1"), json!(true), json!(null), json!([1]), json!({"v": 1})] {
            assert_eq!(SlotState::from_raw(Some(&value)), SlotState::Occupied, "value {}", value);
        }
        assert_eq!(SlotState::from_raw(None), SlotState::Occupied);
    }

    #[test]
    fn test_snapshot_accessors() {
        let snapshot = Snapshot::from(vec![
            SlotState::Available,
            SlotState::Occupied,
            SlotState::Available,
        ]);

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.available_count(), 2);
        assert_eq!(snapshot.get(1), Some(SlotState::Occupied));
        assert_eq!(snapshot.get(3), None);
        assert_eq!(snapshot.iter().last(), Some((2, SlotState::Available)));
    }

    #[test]
    fn test_snapshot_serializes_as_list() {
        let snapshot = Snapshot::from(vec![SlotState::Available, SlotState::Occupied]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"["available","occupied"]"#);
    }
}
