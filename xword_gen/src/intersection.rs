use common::crossword::Orientation;
use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike, MutGridlike},
};

use crate::slot::{Slot, SlotId};

/// Links every Across slot to the Down slot sharing each of its cells, in
/// both directions.
pub(crate) fn link_crossings(slots: &mut [Slot], width: u32, height: u32) -> XWordResult {
  let mut across_owners: Grid<Option<SlotId>> = Grid::new(width, height);
  let mut down_owners: Grid<Option<SlotId>> = Grid::new(width, height);

  for (id, slot) in slots.iter().enumerate() {
    let owners = match slot.orientation() {
      Orientation::Across => &mut across_owners,
      Orientation::Down => &mut down_owners,
    };
    for pos in slot.cells() {
      let owner = owners.get_mut(pos).ok_or_else(|| {
        XWordError::Internal(format!("Slot {id} runs off the grid at {pos}"))
      })?;
      if let Some(other) = owner {
        return Err(
          XWordError::Internal(format!(
            "Grid already has an entry: {} slots {other} and {id} both claim {pos}",
            slot.orientation()
          ))
          .into(),
        );
      }
      *owner = Some(id);
    }
  }

  for id in 0..slots.len() {
    if slots[id].orientation() != Orientation::Across {
      continue;
    }
    for offset in 0..slots[id].length() {
      let pos = slots[id].cell(offset);
      let Some(&Some(down_id)) = down_owners.get(pos) else {
        continue;
      };
      let down_offset = slots[down_id].offset_of(pos).ok_or_else(|| {
        XWordError::Internal(format!("Invalid intersection of slots {id} and {down_id} at {pos}"))
      })?;
      slots[id].set_crossing(offset, down_id);
      slots[down_id].set_crossing(down_offset, id);
    }
  }

  Ok(())
}
