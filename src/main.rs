#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;

use std::{
  error::Error,
  fs,
  ops::ControlFlow,
  path::Path,
};

use args::{Args, Command, FormatArgs, SolveArgs};
use clap::Parser;
use common::{
  crossword::{FilledCrossword, XWordTile},
  html,
};
use itertools::Itertools;
use util::{
  bitcode,
  error::{XWordError, XWordResult},
  time::time_fn,
};
use xword_dict::WordIndex;
use xword_gen::{board::Board, search::Solver};

const SAMPLE_TEMPLATE: [&str; 5] = ["s..e.", ".*...", ".l.r.", "...*.", ".b..s"];

fn load_board(template: Option<&Path>) -> XWordResult<Board> {
  match template {
    Some(path) => Board::from_layout(&fs::read_to_string(path)?),
    None => Board::from_rows(SAMPLE_TEMPLATE),
  }
}

fn write_html(path: &Path, xword: &FilledCrossword, heading: Option<&str>) -> XWordResult {
  fs::write(path, html::render(xword, heading))?;
  log::info!("Wrote {}", path.display());
  Ok(())
}

fn find_and_save_solutions(args: &SolveArgs) -> XWordResult {
  let board = load_board(args.template.as_deref())?;
  let lengths = board.required_lengths();
  log::debug!("Need words of lengths: {}", lengths.iter().sorted().join(", "));

  let words = WordIndex::read_word_list(&args.dict, Some(&lengths))?;
  let limit = args.solution_limit();

  let mut solver = Solver::new(board, &words);
  let mut emitted: u64 = 0;
  let mut saved = vec![];
  let mut sink_error: Option<Box<dyn Error>> = None;

  let (time, stats) = time_fn(|| {
    solver.solve(|board| {
      let xword = board.snapshot();
      if !args.quiet {
        println!("{xword}");
      }
      if let (Some(path), 0) = (&args.html, emitted) {
        if let Err(err) = write_html(path, &xword, args.heading.as_deref()) {
          sink_error = Some(err);
          return ControlFlow::Break(());
        }
      }
      emitted += 1;
      if args.save.is_some() {
        saved.push(xword);
      }

      if limit.is_some_and(|limit| emitted >= limit) {
        ControlFlow::Break(())
      } else {
        ControlFlow::Continue(())
      }
    })
  });
  let stats = stats?;
  if let Some(err) = sink_error {
    return Err(err);
  }

  println!("Took {}s", time.as_secs_f32());
  if stats.solutions == 0 {
    println!("No solutions found");
  }

  if let Some(path) = &args.save {
    fs::write(path, bitcode::encode(&saved))?;
    log::info!("Saved {} solutions to {}", saved.len(), path.display());
  }

  Ok(())
}

fn filled_crossword(layout: &str) -> XWordResult<FilledCrossword> {
  let board = Board::from_layout(layout)?;
  if board.grid().cells().any(XWordTile::empty) {
    return Err(
      XWordError::Template("Template still has open cells; fill it with `solve` first".to_owned())
        .into(),
    );
  }
  Ok(board.snapshot())
}

fn format_crossword(args: &FormatArgs) -> XWordResult {
  let xword = filled_crossword(&fs::read_to_string(&args.template)?)?;
  print!("{xword}");
  write_html(&args.html, &xword, args.heading.as_deref())
}

fn main() -> XWordResult {
  env_logger::init();

  let args = Args::parse();
  match &args.command {
    Command::Solve(solve_args) => find_and_save_solutions(solve_args),
    Command::Format(format_args) => format_crossword(format_args),
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use common::crossword::Orientation;
  use googletest::prelude::*;

  use super::{filled_crossword, load_board};

  #[gtest]
  fn test_sample_template() {
    let board = load_board(None).unwrap();
    expect_eq!(board.slots().len(), 10);
    expect_eq!(board.grid().to_string(), "s..e.\n.*...\n.l.r.\n...*.\n.b..s\n");
  }

  #[gtest]
  fn test_filled_crossword() {
    let xword = filled_crossword("**dab\n*wore\nsaute\neggs*\nash**\n").unwrap();
    expect_that!(xword.answer(4, Orientation::Down), some(eq("wags")));
  }

  #[gtest]
  fn test_filled_crossword_rejects_open_cells() {
    expect_that!(filled_crossword("ab\n.d"), err(anything()));
  }
}
