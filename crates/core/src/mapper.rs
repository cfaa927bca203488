//! Reading mapper: raw sensor fields to an ordered snapshot

use parkwatch_types::{RawSnapshot, SlotState, Snapshot};

use crate::constants::DEFAULT_SLOT_FIELDS;

/// Maps a raw remote snapshot onto the configured slots.
///
/// The field list is fixed at construction; its length is the slot count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingMapper {
    fields: Vec<String>,
}

impl ReadingMapper {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Ordered sensor field names
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn slot_count(&self) -> usize {
        self.fields.len()
    }

    /// Build a snapshot with exactly one state per configured field.
    ///
    /// Extra fields in `raw` are ignored and missing ones read as occupied.
    pub fn map(&self, raw: &RawSnapshot) -> Snapshot {
        self.fields
            .iter()
            .map(|field| SlotState::from_raw(raw.get(field)))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Default for ReadingMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawSnapshot {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_four_slot_reading() {
        let mapper = ReadingMapper::default();
        let snapshot = mapper.map(&raw(json!({
            "ir_sen1": 1,
            "ir_sen2": 0,
            "ir_sen3": 1,
            "ir_sen4": 0
        })));

        assert_eq!(
            snapshot.slots(),
            &[
                SlotState::Available,
                SlotState::Occupied,
                SlotState::Available,
                SlotState::Occupied
            ]
        );
    }

    #[test]
    fn test_empty_reading_is_all_occupied() {
        let mapper = ReadingMapper::default();
        let snapshot = mapper.map(&RawSnapshot::new());

        assert_eq!(snapshot.len(), 4);
        assert!(snapshot.slots().iter().all(|s| *s == SlotState::Occupied));
    }

    #[test]
    fn test_length_follows_field_list_not_input() {
        let mapper = ReadingMapper::new(["a", "b"]);
        let snapshot = mapper.map(&raw(json!({
            "a": 1,
            "c": 1,
            "d": 1,
            "e": 1
        })));

        assert_eq!(snapshot.slots(), &[SlotState::Available, SlotState::Occupied]);
    }

    #[test]
    fn test_odd_values_are_occupied() {
        let mapper = ReadingMapper::new(["s1", "s2", "s3", "s4", "s5"]);
        let snapshot = mapper.map(&raw(json!({
            "s1": null,
            "s2": "1",
            "s3": true,
            "s4": 1.0
        })));

        assert_eq!(
            snapshot.slots(),
            &[
                SlotState::Occupied,
                SlotState::Occupied,
                SlotState::Occupied,
                SlotState::Available,
                SlotState::Occupied
            ]
        );
    }

    #[test]
    fn test_zero_slots() {
        let mapper = ReadingMapper::new(Vec::<String>::new());
        assert!(mapper.map(&raw(json!({"ir_sen1": 1}))).is_empty());
    }
}
