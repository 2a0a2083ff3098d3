use std::fmt::{self, Display, Formatter};

use util::{grid::Gridlike, pos::Pos};

use crate::crossword::{FilledCrossword, Orientation, XWordTile};

const STYLE: &str = "body
{
  font-family: Calibri;
}
table
{
  border-collapse: collapse;
}
td
{
  vertical-align: top;
}
td.clues
{
  padding: 0px 25px;
}
td.clues td
{
  width: 350px;
  font-size: 16pt;
}
table.grid td
{
  border: 2px solid #888;
  width: 96px;
  height: 108px;
  margin: 0;
  padding: 1px 5px;
  font-size: 16pt;
  font-weight: bold;
}
table.grid td.filled
{
  background-color: #CCC;
}";

/// Printable page: the numbered, unlettered grid next to the Across and Down
/// answer lists.
pub struct HtmlPage<'a> {
  xword: &'a FilledCrossword,
  heading: Option<&'a str>,
}

impl<'a> HtmlPage<'a> {
  pub fn new(xword: &'a FilledCrossword, heading: Option<&'a str>) -> Self {
    Self { xword, heading }
  }

  fn write_grid(&self, f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "<table class=\"grid\">")?;
    let grid = self.xword.grid();
    for y in 0..grid.height() as i32 {
      writeln!(f, "<tr>")?;
      for x in 0..grid.width() as i32 {
        let pos = Pos { x, y };
        match (grid.get(pos), self.xword.number_at(pos)) {
          (Some(XWordTile::Wall) | None, _) => writeln!(f, "<td class=\"filled\"></td>")?,
          (_, Some(number)) => writeln!(f, "<td>{number}</td>")?,
          (_, None) => writeln!(f, "<td></td>")?,
        }
      }
      writeln!(f, "</tr>")?;
    }
    writeln!(f, "</table>")
  }

  fn write_answers(&self, f: &mut Formatter<'_>, orientation: Orientation) -> fmt::Result {
    writeln!(f, "<td>")?;
    writeln!(f, "<h2>{orientation}</h2>")?;
    writeln!(f, "<ol>")?;
    for answer in self.xword.answers(orientation) {
      writeln!(f, "<li value=\"{}\">{}</li>", answer.number, Escaped(&answer.word))?;
    }
    writeln!(f, "</ol>")?;
    writeln!(f, "</td>")
  }
}

impl Display for HtmlPage<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "<html>")?;
    writeln!(f, "<head>")?;
    writeln!(f, "<title>Crossword</title>")?;
    writeln!(f, "<style>\n{STYLE}\n</style>")?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body>")?;
    if let Some(heading) = self.heading {
      writeln!(f, "<h1>{}</h1>", Escaped(heading))?;
    }
    writeln!(f, "<table>")?;
    writeln!(f, "<tr>")?;
    writeln!(f, "<td>")?;
    self.write_grid(f)?;
    writeln!(f, "</td>")?;
    writeln!(f, "<td class=\"clues\">")?;
    writeln!(f, "<table>")?;
    writeln!(f, "<tr>")?;
    self.write_answers(f, Orientation::Across)?;
    self.write_answers(f, Orientation::Down)?;
    writeln!(f, "</tr>")?;
    writeln!(f, "</table>")?;
    writeln!(f, "</td>")?;
    writeln!(f, "</tr>")?;
    writeln!(f, "</table>")?;
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
  }
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.0.chars().try_for_each(|c| match c {
      '<' => f.write_str("&lt;"),
      '>' => f.write_str("&gt;"),
      '&' => f.write_str("&amp;"),
      '"' => f.write_str("&quot;"),
      _ => write!(f, "{c}"),
    })
  }
}

pub fn render(xword: &FilledCrossword, heading: Option<&str>) -> String {
  HtmlPage::new(xword, heading).to_string()
}

#[cfg(test)]
mod tests {
  use googletest::prelude::*;

  use super::render;
  use crate::crossword::tests::small_solution;

  #[gtest]
  fn test_grid_cells() {
    let html = render(&small_solution(), None);
    expect_that!(
      html,
      contains_substring(
        "<tr>\n<td class=\"filled\"></td>\n<td class=\"filled\"></td>\n<td>1</td>\n<td>2</td>\n<td>3</td>\n</tr>"
      )
    );
    expect_that!(
      html,
      contains_substring("<tr>\n<td>5</td>\n<td></td>\n<td></td>\n<td></td>\n<td></td>\n</tr>")
    );
    expect_that!(html, not(contains_substring("<h1>")));
  }

  #[gtest]
  fn test_answer_lists() {
    let html = render(&small_solution(), None);
    expect_that!(
      html,
      contains_substring("<h2>Across</h2>\n<ol>\n<li value=\"1\">dab</li>\n<li value=\"4\">wore</li>")
    );
    expect_that!(
      html,
      contains_substring("<h2>Down</h2>\n<ol>\n<li value=\"1\">dough</li>\n<li value=\"2\">arts</li>")
    );
  }

  #[gtest]
  fn test_heading_escaped() {
    let html = render(&small_solution(), Some("Tom & Jerry's <b>"));
    expect_that!(html, contains_substring("<h1>Tom &amp; Jerry's &lt;b&gt;</h1>"));
  }
}
