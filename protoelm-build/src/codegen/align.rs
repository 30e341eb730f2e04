//! Encode-side alignment of fields to wire numbers.
//!
//! The runtime stores a message as an array indexed by `number - 1`, so a
//! message encoder must emit exactly one value per position up to the highest
//! declared number. Numbers that no field uses get a `JE.null`.

use crate::model::{EncodeEntry, EncodeSlot};

/// Order `entries` by wire number and fill every gap with a placeholder.
///
/// The sort is stable, so entries sharing a number keep their relative order
/// and are emitted back to back.
pub fn plan(mut entries: Vec<EncodeEntry>) -> Vec<EncodeSlot> {
    entries.sort_by_key(|entry| entry.number);

    let capacity = entries.last().map_or(0, |entry| entry.number as usize);
    let mut slots = Vec::with_capacity(capacity);
    let mut next = 1;

    for entry in entries {
        while next < entry.number {
            slots.push(EncodeSlot::Placeholder);
            next += 1;
        }
        slots.push(EncodeSlot::Field(entry.expr));
        next = next.max(entry.number + 1);
    }

    slots
}
