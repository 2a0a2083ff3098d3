use common::crossword::XWordTile;
use util::{
  error::{XWordError, XWordResult},
  grid::Grid,
};

/// Parses template rows into a grid. Rows are lowercased, then every
/// character must be `*` (wall), `.` (open) or a letter `a-z` (pre-filled).
pub fn parse_rows<S>(rows: impl IntoIterator<Item = S>) -> XWordResult<Grid<XWordTile>>
where
  S: AsRef<str>,
{
  let (width, height, tiles) = rows.into_iter().enumerate().try_fold(
    (None, 0u32, vec![]),
    |(width, height, mut tiles), (y, row)| -> XWordResult<_> {
      let row = row.as_ref().to_ascii_lowercase();
      let row_len = row.chars().count();
      if let Some(width) = width {
        if row_len != width {
          return Err(
            XWordError::Template(format!(
              "All rows must have the same length: row {} has length {row_len}, expected {width}",
              y + 1
            ))
            .into(),
          );
        }
      }

      tiles.extend(
        row
          .chars()
          .enumerate()
          .map(|(x, c)| {
            XWordTile::from_template_char(c).ok_or_else(|| {
              XWordError::Template(format!(
                "Invalid character '{c}' in template row {}, column {}",
                y + 1,
                x + 1
              ))
            })
          })
          .collect::<Result<Vec<_>, _>>()?,
      );

      Ok((Some(width.unwrap_or(row_len)), height + 1, tiles))
    },
  )?;

  let width = width.ok_or_else(|| XWordError::Template("Empty template".to_owned()))?;
  if width == 0 {
    return Err(XWordError::Template("Template rows are empty".to_owned()).into());
  }

  Grid::from_vec(tiles, width as u32, height)
}

/// Parses the template file format: one row per line. Surrounding whitespace
/// is ignored, as are blank lines and lines starting with `#`.
pub fn parse_layout(layout: &str) -> XWordResult<Grid<XWordTile>> {
  parse_rows(
    layout
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty() && !line.starts_with('#')),
  )
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use common::crossword::XWordTile;
  use googletest::prelude::*;
  use util::{
    error::as_xword_error,
    grid::Gridlike,
    pos::Pos,
  };

  use super::{parse_layout, parse_rows};

  #[gtest]
  fn test_parse_tiles() {
    let grid = parse_rows(["s.*", "..E"]);
    assert_that!(grid, ok(anything()));
    let grid = grid.unwrap();
    expect_eq!(grid.width(), 3);
    expect_eq!(grid.height(), 2);
    expect_that!(grid.get(Pos { x: 0, y: 0 }).copied(), some(eq(XWordTile::Letter('s'))));
    expect_that!(grid.get(Pos { x: 1, y: 0 }).copied(), some(eq(XWordTile::Empty)));
    expect_that!(grid.get(Pos { x: 2, y: 0 }).copied(), some(eq(XWordTile::Wall)));
    expect_that!(grid.get(Pos { x: 2, y: 1 }).copied(), some(eq(XWordTile::Letter('e'))));
  }

  #[gtest]
  fn test_unequal_rows() {
    let err = parse_rows(["ab", "abc"]).unwrap_err();
    expect_true!(as_xword_error(err.as_ref()).is_some_and(|err| err.is_template()));
    expect_that!(err.to_string(), contains_substring("row 2 has length 3, expected 2"));
  }

  #[gtest]
  fn test_invalid_character() {
    let err = parse_rows(["a_", ".."]).unwrap_err();
    expect_true!(as_xword_error(err.as_ref()).is_some_and(|err| err.is_template()));
    expect_that!(err.to_string(), contains_substring("'_'"));
  }

  #[gtest]
  fn test_empty() {
    expect_that!(parse_rows(Vec::<String>::new()), err(anything()));
    expect_that!(parse_rows([""]), err(anything()));
    expect_that!(parse_layout("\n  \n# nothing here\n"), err(anything()));
  }

  #[gtest]
  fn test_layout_format() {
    let grid = parse_layout(
      "# 2x2 corner
       ab
       .*
      ",
    );
    assert_that!(grid, ok(anything()));
    expect_eq!(grid.unwrap().to_string(), "ab\n.*\n");
  }
}
