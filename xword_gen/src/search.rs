use std::ops::ControlFlow;

use common::crossword::FilledCrossword;
use util::error::XWordResult;
use xword_dict::WordIndex;

use crate::{board::Board, slot::SlotId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
  /// Complete, verified grids handed to the sink.
  pub solutions: usize,
  /// Candidate words written into the grid.
  pub placements: usize,
  /// Branches abandoned because a word failed verification or a crossing
  /// slot had no candidates left.
  pub dead_ends: usize,
}

/// Depth-first backtracking over slot assignments.
///
/// Slots are visited in construction order (all Across, then all Down). After
/// a word is written, every crossing slot is checked: complete ones must be
/// dictionary words and incomplete ones must still have a matching candidate.
/// The first incomplete crossing slot is filled next, before moving on to the
/// next slot in order.
pub struct Solver<'a> {
  board: Board,
  words: &'a WordIndex,
  order: Vec<SlotId>,
  stats: SearchStats,
}

impl<'a> Solver<'a> {
  pub fn new(board: Board, words: &'a WordIndex) -> Self {
    let order = (0..board.slots().len()).collect();
    Self { board, words, order, stats: SearchStats::default() }
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn into_board(self) -> Board {
    self.board
  }

  /// Runs the search to exhaustion, passing every solution to `emit`. The
  /// search stops early only if `emit` returns `ControlFlow::Break`. The board
  /// is back in its template state when this returns.
  pub fn solve<F>(&mut self, mut emit: F) -> XWordResult<SearchStats>
  where
    F: FnMut(&Board) -> ControlFlow<()>,
  {
    self.stats = SearchStats::default();
    let checkpoint = self.board.checkpoint();
    let result = self.advance(0, &mut emit);
    self.board.rollback(checkpoint);
    if result?.is_break() {
      log::debug!("Search stopped by the caller");
    }

    log::info!(
      "Search finished: {} solutions, {} placements, {} dead ends",
      self.stats.solutions,
      self.stats.placements,
      self.stats.dead_ends
    );
    Ok(self.stats)
  }

  /// Collects owned copies of up to `limit` solutions.
  pub fn collect(&mut self, limit: Option<usize>) -> XWordResult<Vec<FilledCrossword>> {
    let mut solutions = vec![];
    if limit == Some(0) {
      return Ok(solutions);
    }
    self.solve(|board| {
      solutions.push(board.snapshot());
      if limit.is_some_and(|limit| solutions.len() >= limit) {
        ControlFlow::Break(())
      } else {
        ControlFlow::Continue(())
      }
    })?;
    Ok(solutions)
  }

  fn advance<F>(&mut self, index: usize, emit: &mut F) -> XWordResult<ControlFlow<()>>
  where
    F: FnMut(&Board) -> ControlFlow<()>,
  {
    let Some(&slot_id) = self.order.get(index) else {
      self.stats.solutions += 1;
      log::debug!("Solution {}:\n{}", self.stats.solutions, self.board.grid());
      return Ok(emit(&self.board));
    };

    if self.board.slot(slot_id).is_complete() {
      if !self.board.verify(slot_id, self.words) {
        self.stats.dead_ends += 1;
        return Ok(ControlFlow::Continue(()));
      }
      return self.advance(index + 1, emit);
    }

    self.try_candidates(slot_id, index, emit)
  }

  /// Tries every dictionary word that fits the slot's current letters, in
  /// dictionary order.
  fn try_candidates<F>(
    &mut self,
    slot_id: SlotId,
    index: usize,
    emit: &mut F,
  ) -> XWordResult<ControlFlow<()>>
  where
    F: FnMut(&Board) -> ControlFlow<()>,
  {
    let words = self.words;
    for word in words.candidates_of_length(self.board.slot(slot_id).length()) {
      if !self.board.matches(slot_id, word) {
        continue;
      }
      if self.fill(slot_id, index, word, emit)?.is_break() {
        return Ok(ControlFlow::Break(()));
      }
    }
    Ok(ControlFlow::Continue(()))
  }

  fn fill<F>(
    &mut self,
    slot_id: SlotId,
    index: usize,
    word: &str,
    emit: &mut F,
  ) -> XWordResult<ControlFlow<()>>
  where
    F: FnMut(&Board) -> ControlFlow<()>,
  {
    self.stats.placements += 1;
    let checkpoint = self.board.checkpoint();
    let flow = self
      .board
      .place(slot_id, word)
      .and_then(|()| self.propagate(slot_id, index, emit));
    self.board.rollback(checkpoint);
    flow
  }

  fn propagate<F>(
    &mut self,
    slot_id: SlotId,
    index: usize,
    emit: &mut F,
  ) -> XWordResult<ControlFlow<()>>
  where
    F: FnMut(&Board) -> ControlFlow<()>,
  {
    let mut first_incomplete = None;
    for offset in 0..self.board.slot(slot_id).length() {
      let Some(crosser) = self.board.slot(slot_id).crossing(offset) else {
        continue;
      };

      if self.board.slot(crosser).is_complete() {
        if !self.board.verify(crosser, self.words) {
          self.stats.dead_ends += 1;
          return Ok(ControlFlow::Continue(()));
        }
        continue;
      }

      if !self.has_candidate(crosser) {
        self.stats.dead_ends += 1;
        return Ok(ControlFlow::Continue(()));
      }
      first_incomplete.get_or_insert(crosser);
    }

    match first_incomplete {
      None => self.advance(index + 1, emit),
      Some(crosser) => self.try_candidates(crosser, index, emit),
    }
  }

  fn has_candidate(&self, slot_id: SlotId) -> bool {
    self
      .words
      .candidates_of_length(self.board.slot(slot_id).length())
      .iter()
      .any(|word| self.board.matches(slot_id, word))
  }
}
