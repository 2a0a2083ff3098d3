use std::collections::HashSet;

use common::crossword::{ClueAnswer, FilledCrossword, Orientation, XWordTile, EMPTY_CHAR};
use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike, MutGridlike},
  pos::Pos,
};
use xword_dict::WordIndex;

use crate::{
  intersection::link_crossings,
  numbering::number_slots,
  slot::{Slot, SlotId},
  template,
};

struct Run {
  pos: Pos,
  length: u32,
}

/// A letter written into a previously blank cell, as seen from `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LetterWrite {
  slot: SlotId,
  offset: u32,
}

/// Position in the undo log to roll back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The template grid and the slots running through it. Letters are written
/// in place and undone in LIFO order through the undo log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
  grid: Grid<XWordTile>,
  slots: Vec<Slot>,
  writes: Vec<LetterWrite>,
}

impl Board {
  pub fn from_rows<S>(rows: impl IntoIterator<Item = S>) -> XWordResult<Self>
  where
    S: AsRef<str>,
  {
    Self::from_grid(template::parse_rows(rows)?)
  }

  pub fn from_layout(layout: &str) -> XWordResult<Self> {
    Self::from_grid(template::parse_layout(layout)?)
  }

  pub fn from_grid(grid: Grid<XWordTile>) -> XWordResult<Self> {
    let mut slots = Self::build_slots(&grid);
    link_crossings(&mut slots, grid.width(), grid.height())?;
    number_slots(&mut slots);

    for slot in &slots {
      log::debug!(
        "{} {} at {}: length {}, {} blank",
        slot.number(),
        slot.orientation(),
        slot.pos(),
        slot.length(),
        slot.blank_count()
      );
    }

    Ok(Self { grid, slots, writes: vec![] })
  }

  fn iterate_board_row_runs<'a, G: Gridlike<XWordTile> + 'a>(
    board: G,
  ) -> impl Iterator<Item = Run> + 'a {
    struct OpenSequences<I> {
      x: u32,
      y: u32,
      iter: Option<I>,
    }

    impl<I> Iterator for OpenSequences<I>
    where
      I: Iterator<Item = XWordTile>,
    {
      type Item = Run;

      fn next(&mut self) -> Option<Run> {
        let iter = self.iter.as_mut()?;

        loop {
          self.x += 1;
          match iter.next() {
            Some(XWordTile::Empty | XWordTile::Letter(_)) => break,
            Some(XWordTile::Wall) => {}
            None => return None,
          }
        }
        let mut length = 1;
        let pos = Pos { x: (self.x - 1) as i32, y: self.y as i32 };

        loop {
          self.x += 1;
          match iter.next() {
            Some(XWordTile::Empty | XWordTile::Letter(_)) => length += 1,
            Some(XWordTile::Wall) => break,
            None => {
              self.iter = None;
              break;
            }
          }
        }

        Some(Run { pos, length })
      }
    }

    (0..board.height()).flat_map(move |y| {
      let runs: Vec<_> = OpenSequences { x: 0, y, iter: Some(board.iter_row(y).cloned()) }.collect();
      runs.into_iter()
    })
  }

  /// Across slots in row-major order, then Down slots in column-major order.
  /// Runs shorter than two cells are not words and are dropped.
  fn build_slots(grid: &Grid<XWordTile>) -> Vec<Slot> {
    let across = Self::iterate_board_row_runs(grid).map(|run| (run, Orientation::Across));
    let down = Self::iterate_board_row_runs(grid.transpose())
      .map(|run| (Run { pos: run.pos.transpose(), ..run }, Orientation::Down));

    across
      .chain(down)
      .filter(|(run, _)| run.length >= 2)
      .map(|(Run { pos, length }, orientation)| {
        let blank_count = (0..length as i32)
          .filter(|&offset| grid.get(pos + offset * orientation.step()).is_some_and(XWordTile::empty))
          .count() as u32;
        Slot::new(pos, length, orientation, blank_count)
      })
      .collect()
  }

  pub fn grid(&self) -> &Grid<XWordTile> {
    &self.grid
  }

  pub fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub fn slot(&self, id: SlotId) -> &Slot {
    &self.slots[id]
  }

  pub fn slots_with(&self, orientation: Orientation) -> impl Iterator<Item = (SlotId, &Slot)> {
    self
      .slots
      .iter()
      .enumerate()
      .filter(move |(_, slot)| slot.orientation() == orientation)
  }

  /// Every slot length present, including complete slots, which still need
  /// their words verified.
  pub fn required_lengths(&self) -> HashSet<u32> {
    self.slots.iter().map(Slot::length).collect()
  }

  pub fn is_filled(&self) -> bool {
    self.slots.iter().all(Slot::is_complete)
  }

  fn word_of(&self, slot: &Slot) -> String {
    slot
      .cells()
      .map(|pos| self.grid.get(pos).and_then(XWordTile::letter).unwrap_or(EMPTY_CHAR))
      .collect()
  }

  /// The slot's current letters, blanks shown as `.`.
  pub fn word(&self, id: SlotId) -> String {
    self.word_of(&self.slots[id])
  }

  /// Whether `word` fits the slot: blanks match anything, letters must agree.
  pub fn matches(&self, id: SlotId, word: &str) -> bool {
    let slot = &self.slots[id];
    word.len() == slot.length() as usize
      && slot.cells().zip(word.chars()).all(|(pos, c)| match self.grid.get(pos) {
        Some(XWordTile::Empty) => true,
        Some(XWordTile::Letter(letter)) => *letter == c,
        Some(XWordTile::Wall) | None => false,
      })
  }

  /// Checks the slot's word against the dictionary, caching a success until
  /// one of its letters is undone.
  pub fn verify(&mut self, id: SlotId, words: &WordIndex) -> bool {
    if self.slots[id].verified() {
      return true;
    }
    if !words.contains(&self.word(id)) {
      return false;
    }
    self.slots[id].set_verified();
    true
  }

  pub fn checkpoint(&self) -> Checkpoint {
    Checkpoint(self.writes.len())
  }

  /// Writes `word` into the blank cells of the slot. Cells that already hold
  /// a letter must hold the same letter.
  pub fn place(&mut self, id: SlotId, word: &str) -> XWordResult {
    let length = self.slots[id].length();
    if word.len() != length as usize {
      return Err(
        XWordError::Internal(format!("Word \"{word}\" does not fit slot {id} of length {length}"))
          .into(),
      );
    }

    for (offset, c) in (0..length).zip(word.chars()) {
      let pos = self.slots[id].cell(offset);
      let tile = self
        .grid
        .get_mut(pos)
        .ok_or_else(|| XWordError::Internal(format!("Position {pos} is out of bounds")))?;
      match *tile {
        XWordTile::Empty => {
          *tile = XWordTile::Letter(c);
          self.slots[id].fill_blank();
          if let Some(other) = self.slots[id].crossing(offset) {
            self.slots[other].fill_blank();
          }
          self.writes.push(LetterWrite { slot: id, offset });
        }
        XWordTile::Letter(existing) if existing == c => {}
        existing => {
          return Err(
            XWordError::Internal(format!(
              "Bad character: cannot write '{c}' over '{existing}' at {pos}"
            ))
            .into(),
          );
        }
      }
    }

    Ok(())
  }

  /// Undoes every write made after `checkpoint`, newest first.
  pub fn rollback(&mut self, checkpoint: Checkpoint) {
    let Checkpoint(len) = checkpoint;
    while self.writes.len() > len {
      let Some(LetterWrite { slot, offset }) = self.writes.pop() else {
        break;
      };
      if let Some(tile) = self.grid.get_mut(self.slots[slot].cell(offset)) {
        *tile = XWordTile::Empty;
      }
      self.slots[slot].unfill_blank();
      if let Some(other) = self.slots[slot].crossing(offset) {
        self.slots[other].unfill_blank();
      }
    }
  }

  /// Owned copy of the current grid with numbered answers.
  pub fn snapshot(&self) -> FilledCrossword {
    let answers = |orientation: Orientation| -> Vec<ClueAnswer> {
      self
        .slots_with(orientation)
        .map(|(_, slot)| ClueAnswer { number: slot.number(), pos: slot.pos(), word: self.word_of(slot) })
        .collect()
    };
    FilledCrossword::new(
      self.grid.clone(),
      answers(Orientation::Across),
      answers(Orientation::Down),
    )
  }
}

#[cfg(test)]
pub(crate) mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use common::crossword::Orientation;
  use googletest::prelude::*;
  use util::{
    error::{as_xword_error, XWordError},
    pos::Pos,
  };
  use xword_dict::WordIndex;

  use super::Board;

  pub(crate) const SAMPLE: [&str; 5] = ["s..e.", ".*...", ".l.r.", "...*.", ".b..s"];

  fn sample() -> Board {
    Board::from_rows(SAMPLE).unwrap()
  }

  fn slot_summary(board: &Board, orientation: Orientation) -> Vec<(u32, Pos, u32, u32)> {
    board
      .slots_with(orientation)
      .map(|(_, slot)| (slot.number(), slot.pos(), slot.length(), slot.blank_count()))
      .collect()
  }

  #[gtest]
  fn test_sample_slots() {
    let board = sample();
    expect_eq!(
      slot_summary(&board, Orientation::Across),
      vec![
        (1, Pos { x: 0, y: 0 }, 5, 3),
        (5, Pos { x: 2, y: 1 }, 3, 3),
        (6, Pos { x: 0, y: 2 }, 5, 3),
        (8, Pos { x: 0, y: 3 }, 3, 3),
        (9, Pos { x: 0, y: 4 }, 5, 3),
      ]
    );
    expect_eq!(
      slot_summary(&board, Orientation::Down),
      vec![
        (1, Pos { x: 0, y: 0 }, 5, 4),
        (7, Pos { x: 1, y: 2 }, 3, 1),
        (2, Pos { x: 2, y: 0 }, 5, 5),
        (3, Pos { x: 3, y: 0 }, 3, 1),
        (4, Pos { x: 4, y: 0 }, 5, 4),
      ]
    );
  }

  #[gtest]
  fn test_across_before_down() {
    let board = sample();
    let orientations: Vec<_> = board.slots().iter().map(|slot| slot.orientation()).collect();
    expect_eq!(orientations.iter().filter(|o| o.is_row()).count(), 5);
    expect_true!(orientations.windows(2).all(|pair| pair[0] <= pair[1]));
  }

  #[gtest]
  fn test_no_short_slots() {
    for layout in [
      vec!["."],
      vec![".*.", "*.*", ".*."],
      vec!["a*", "*b"],
      vec!["..", "*."],
      vec!["****"],
      SAMPLE.to_vec(),
    ] {
      let board = Board::from_rows(layout).unwrap();
      expect_true!(board.slots().iter().all(|slot| slot.length() >= 2));
    }
    expect_true!(Board::from_rows([".*.", "*.*"]).unwrap().slots().is_empty());
  }

  #[gtest]
  fn test_crossings_are_symmetric() {
    let board = sample();
    for (id, slot) in board.slots().iter().enumerate() {
      for (offset, pos) in slot.cells().enumerate() {
        if let Some(other) = slot.crossing(offset as u32) {
          let other_slot = board.slot(other);
          expect_ne!(other_slot.orientation(), slot.orientation());
          let other_offset = other_slot.offset_of(pos).unwrap();
          expect_that!(other_slot.crossing(other_offset), some(eq(id)));
        }
      }
    }
    // 1-Across crosses 1, 2, 3 and 4 Down, but not the single cell at (1, 0).
    expect_eq!(board.slot(0).crossings().count(), 4);
    expect_that!(board.slot(0).crossing(1), none());
  }

  #[gtest]
  fn test_matches() {
    let board = sample();
    expect_true!(board.matches(0, "sheep"));
    expect_true!(board.matches(0, "sated"));
    expect_false!(board.matches(0, "scale"));
    expect_false!(board.matches(0, "sheet!"));
    expect_false!(board.matches(0, "she"));
    expect_eq!(board.word(0), "s..e.");
  }

  #[gtest]
  fn test_place_updates_crossers() {
    let mut board = sample();
    let checkpoint = board.checkpoint();
    assert_that!(board.place(0, "sated"), ok(anything()));
    expect_eq!(board.word(0), "sated");
    expect_true!(board.slot(0).is_complete());
    // 2-Down and 4-Down each got their first letter; 3-Down only had its
    // middle cell blank, which this write didn't touch.
    expect_eq!(board.slot(7).blank_count(), 4);
    expect_eq!(board.slot(9).blank_count(), 3);
    expect_eq!(board.slot(8).blank_count(), 1);
    expect_eq!(board.word(7), "t....");

    board.rollback(checkpoint);
    expect_eq!(board, sample());
  }

  #[gtest]
  fn test_place_rollback_round_trip() {
    let words = WordIndex::from_words(["sated", "ear", "err"], None);
    let mut board = sample();
    assert_that!(board.place(0, "sated"), ok(anything()));
    let before = board.clone();

    let checkpoint = board.checkpoint();
    assert_that!(board.place(1, "ear"), ok(anything()));
    expect_true!(board.verify(1, &words));
    expect_true!(board.verify(8, &words));
    expect_true!(board.slot(8).verified());
    board.rollback(checkpoint);

    expect_eq!(board, before);
    expect_false!(board.slot(8).verified());
  }

  #[gtest]
  fn test_place_mismatch_is_internal_error() {
    let mut board = sample();
    let checkpoint = board.checkpoint();
    let error = board.place(0, "scale").unwrap_err();
    expect_true!(as_xword_error(error.as_ref()).is_some_and(XWordError::is_internal));
    board.rollback(checkpoint);
    expect_eq!(board, sample());

    expect_that!(board.place(0, "sat"), err(anything()));
  }

  #[gtest]
  fn test_verify_caches_until_undone() {
    let words = WordIndex::from_words(["ab"], None);
    let mut board = Board::from_rows(["ab"]).unwrap();
    expect_false!(board.slot(0).verified());
    expect_true!(board.verify(0, &words));
    expect_true!(board.slot(0).verified());

    let mut other = Board::from_rows(["ba"]).unwrap();
    expect_false!(other.verify(0, &words));
    expect_false!(other.slot(0).verified());
  }

  #[gtest]
  fn test_snapshot() {
    let board = Board::from_layout(
      "**dab
       *wore
       saute
       eggs*
       ash**",
    )
    .unwrap();
    expect_true!(board.is_filled());
    let xword = board.snapshot();
    expect_that!(xword.answer(1, Orientation::Across), some(eq("dab")));
    expect_that!(xword.answer(1, Orientation::Down), some(eq("dough")));
    expect_that!(xword.answer(5, Orientation::Across), some(eq("saute")));
    expect_that!(xword.answer(5, Orientation::Down), some(eq("sea")));
    expect_eq!(xword.across().len(), 5);
    expect_eq!(xword.down().len(), 5);
  }

  #[gtest]
  fn test_required_lengths() {
    let board = sample();
    let mut lengths: Vec<_> = board.required_lengths().into_iter().collect();
    lengths.sort();
    expect_that!(lengths, container_eq([3, 5]));
  }
}
