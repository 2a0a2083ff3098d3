use std::fmt::Display;

use bitcode::{Decode, Encode};
use util::{
  grid::Grid,
  pos::{Diff, Pos},
};

pub const WALL_CHAR: char = '*';
pub const EMPTY_CHAR: char = '.';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub enum XWordTile {
  Letter(char),
  Empty,
  Wall,
}

impl XWordTile {
  /// Parses a template character. Letters must already be lowercase.
  pub fn from_template_char(c: char) -> Option<Self> {
    match c {
      WALL_CHAR => Some(XWordTile::Wall),
      EMPTY_CHAR => Some(XWordTile::Empty),
      'a'..='z' => Some(XWordTile::Letter(c)),
      _ => None,
    }
  }

  pub fn empty(&self) -> bool {
    matches!(self, XWordTile::Empty)
  }

  pub fn letter(&self) -> Option<char> {
    match self {
      XWordTile::Letter(c) => Some(*c),
      XWordTile::Empty | XWordTile::Wall => None,
    }
  }
}

impl Display for XWordTile {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        XWordTile::Letter(c) => *c,
        XWordTile::Empty => EMPTY_CHAR,
        XWordTile::Wall => WALL_CHAR,
      }
    )
  }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
pub enum Orientation {
  Across,
  Down,
}

impl Orientation {
  pub fn step(&self) -> Diff {
    match self {
      Orientation::Across => Diff::DX,
      Orientation::Down => Diff::DY,
    }
  }

  pub fn is_row(&self) -> bool {
    matches!(self, Orientation::Across)
  }
}

impl Display for Orientation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Orientation::Across => write!(f, "Across"),
      Orientation::Down => write!(f, "Down"),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct ClueAnswer {
  pub number: u32,
  pub pos: Pos,
  pub word: String,
}

/// A completely filled grid together with its numbered answers.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct FilledCrossword {
  grid: Grid<XWordTile>,
  across: Vec<ClueAnswer>,
  down: Vec<ClueAnswer>,
}

impl FilledCrossword {
  pub fn new(grid: Grid<XWordTile>, mut across: Vec<ClueAnswer>, mut down: Vec<ClueAnswer>) -> Self {
    across.sort_by_key(|answer| answer.number);
    down.sort_by_key(|answer| answer.number);
    Self { grid, across, down }
  }

  pub fn grid(&self) -> &Grid<XWordTile> {
    &self.grid
  }

  pub fn across(&self) -> &[ClueAnswer] {
    &self.across
  }

  pub fn down(&self) -> &[ClueAnswer] {
    &self.down
  }

  pub fn answers(&self, orientation: Orientation) -> &[ClueAnswer] {
    match orientation {
      Orientation::Across => &self.across,
      Orientation::Down => &self.down,
    }
  }

  pub fn answer(&self, number: u32, orientation: Orientation) -> Option<&str> {
    self
      .answers(orientation)
      .iter()
      .find(|answer| answer.number == number)
      .map(|answer| answer.word.as_str())
  }

  /// The clue number printed in the cell at `pos`, if an answer starts there.
  pub fn number_at(&self, pos: Pos) -> Option<u32> {
    self
      .across
      .iter()
      .chain(self.down.iter())
      .find(|answer| answer.pos == pos)
      .map(|answer| answer.number)
  }
}

impl Display for FilledCrossword {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "{}", self.grid)?;
    for orientation in [Orientation::Across, Orientation::Down] {
      writeln!(f, "{orientation}:")?;
      for ClueAnswer { number, word, .. } in self.answers(orientation) {
        writeln!(f, "{number}: {word}")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
