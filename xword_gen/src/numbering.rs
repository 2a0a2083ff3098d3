use std::collections::HashMap;

use itertools::Itertools;
use util::pos::Pos;

use crate::slot::Slot;

/// Numbers distinct start cells 1..=N in reading order.
pub fn clue_numbers(starts: impl IntoIterator<Item = Pos>) -> HashMap<Pos, u32> {
  starts
    .into_iter()
    .sorted_by_key(Pos::row_major_key)
    .dedup()
    .zip(1..)
    .collect()
}

/// Assigns every slot the number of its start cell. An Across and a Down slot
/// starting in the same cell share a number.
pub fn number_slots(slots: &mut [Slot]) {
  let numbers = clue_numbers(slots.iter().map(Slot::pos));
  for slot in slots {
    if let Some(&number) = numbers.get(&slot.pos()) {
      slot.set_number(number);
    }
  }
}
