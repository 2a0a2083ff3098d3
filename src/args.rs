use std::path::PathBuf;

use clap::{Args as CommandArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Fill a template with words from a word list.
  Solve(SolveArgs),
  /// Render an already filled template as an HTML page.
  Format(FormatArgs),
}

#[derive(CommandArgs, Debug)]
pub struct SolveArgs {
  /// Template file, one row per line: `*` wall, `.` open, `a-z` fixed letter.
  /// The built-in sample template is used when omitted.
  #[arg(long)]
  pub template: Option<PathBuf>,

  /// Word list, one word per line.
  #[arg(long, default_value = "words58k.txt")]
  pub dict: PathBuf,

  /// Stop after the first solution.
  #[arg(long, conflicts_with = "limit")]
  pub first: bool,

  /// Stop after this many solutions.
  #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
  pub limit: Option<u64>,

  /// Write the first solution as an HTML page.
  #[arg(long)]
  pub html: Option<PathBuf>,

  /// Page heading for the HTML output.
  #[arg(long)]
  pub heading: Option<String>,

  /// Write every emitted solution here, bitcode encoded.
  #[arg(long)]
  pub save: Option<PathBuf>,

  /// Don't print solutions to stdout.
  #[arg(long)]
  pub quiet: bool,
}

impl SolveArgs {
  pub fn solution_limit(&self) -> Option<u64> {
    if self.first {
      Some(1)
    } else {
      self.limit
    }
  }
}

#[derive(CommandArgs, Debug)]
pub struct FormatArgs {
  /// A template with every cell either a wall or a letter.
  #[arg(long)]
  pub template: PathBuf,

  #[arg(long, default_value = "crossword.html")]
  pub html: PathBuf,

  #[arg(long)]
  pub heading: Option<String>,
}
