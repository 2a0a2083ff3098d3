use common::crossword::Orientation;
use util::pos::Pos;

/// Index of a slot in `Board::slots`.
pub type SlotId = usize;

/// A run of at least two non-wall cells in one orientation. Holds coordinates
/// only; letters live in the board's grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
  pos: Pos,
  length: u32,
  orientation: Orientation,
  number: u32,
  blank_count: u32,
  verified: bool,
  crossings: Vec<Option<SlotId>>,
}

impl Slot {
  pub(crate) fn new(pos: Pos, length: u32, orientation: Orientation, blank_count: u32) -> Self {
    Self {
      pos,
      length,
      orientation,
      number: 0,
      blank_count,
      verified: false,
      crossings: vec![None; length as usize],
    }
  }

  pub fn pos(&self) -> Pos {
    self.pos
  }

  pub fn length(&self) -> u32 {
    self.length
  }

  pub fn orientation(&self) -> Orientation {
    self.orientation
  }

  /// Clue number, assigned once the board is built.
  pub fn number(&self) -> u32 {
    self.number
  }

  pub fn blank_count(&self) -> u32 {
    self.blank_count
  }

  pub fn is_complete(&self) -> bool {
    self.blank_count == 0
  }

  pub fn verified(&self) -> bool {
    self.verified
  }

  /// The slot of the other orientation sharing the cell at `offset`.
  pub fn crossing(&self, offset: u32) -> Option<SlotId> {
    self.crossings.get(offset as usize).copied().flatten()
  }

  pub fn crossings(&self) -> impl Iterator<Item = SlotId> + '_ {
    self.crossings.iter().flatten().copied()
  }

  pub fn cell(&self, offset: u32) -> Pos {
    self.pos + offset as i32 * self.orientation.step()
  }

  pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
    (0..self.length).map(|offset| self.cell(offset))
  }

  /// Offset of `pos` within this slot, if the slot covers it.
  pub fn offset_of(&self, pos: Pos) -> Option<u32> {
    let diff = pos - self.pos;
    let on_axis = match self.orientation {
      Orientation::Across => diff.y == 0 && diff.x >= 0,
      Orientation::Down => diff.x == 0 && diff.y >= 0,
    };
    let offset = diff.axis_len() as u32;
    (on_axis && offset < self.length).then_some(offset)
  }

  pub(crate) fn set_number(&mut self, number: u32) {
    self.number = number;
  }

  pub(crate) fn set_crossing(&mut self, offset: u32, other: SlotId) {
    if let Some(crossing) = self.crossings.get_mut(offset as usize) {
      *crossing = Some(other);
    }
  }

  pub(crate) fn set_verified(&mut self) {
    self.verified = true;
  }

  pub(crate) fn fill_blank(&mut self) {
    debug_assert!(self.blank_count > 0);
    self.blank_count -= 1;
  }

  pub(crate) fn unfill_blank(&mut self) {
    self.blank_count += 1;
    self.verified = false;
  }
}
