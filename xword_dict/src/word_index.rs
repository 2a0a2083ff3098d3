use std::{
  borrow::Borrow,
  collections::{hash_map::Entry, HashMap, HashSet},
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use itertools::Itertools;
use util::error::{XWordError, XWordResult};

/// Dictionary bucketed by word length. Within a bucket, words keep the order
/// they were loaded in, which decides the order candidates are tried.
#[derive(Clone, Debug, Default)]
pub struct WordIndex {
  by_length: HashMap<u32, Vec<String>>,
  word_set: HashSet<String>,
}

impl WordIndex {
  fn canonicalize_word(word: &str) -> String {
    word.trim().to_ascii_lowercase()
  }

  fn is_valid_word(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_lowercase())
  }

  /// Builds the index from `words`. When `lengths` is given, only words of
  /// those lengths are kept.
  pub fn from_words<S>(words: impl IntoIterator<Item = S>, lengths: Option<&HashSet<u32>>) -> Self
  where
    S: Borrow<str>,
  {
    let mut index = Self::default();
    let mut skipped = 0usize;
    for word in words {
      let word = Self::canonicalize_word(word.borrow());
      if word.is_empty() {
        continue;
      }
      if !Self::is_valid_word(&word) {
        skipped += 1;
        continue;
      }
      let len = word.len() as u32;
      if lengths.is_some_and(|lengths| !lengths.contains(&len)) {
        continue;
      }
      index.insert(len, word);
    }

    if skipped > 0 {
      log::warn!("Skipped {skipped} words containing characters outside a-z");
    }
    log::info!(
      "Loaded {} words, lengths [{}]",
      index.len(),
      index.lengths().map(|len| format!("{len}: {}", index.candidates_of_length(len).len())).join(", ")
    );
    index
  }

  /// Reads a word list with one word per line.
  pub fn read_word_list(path: impl AsRef<Path>, lengths: Option<&HashSet<u32>>) -> XWordResult<Self> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
      XWordError::Dictionary(format!("Failed to open word list {}: {err}", path.display()))
    })?;
    let lines = BufReader::new(file)
      .lines()
      .collect::<Result<Vec<_>, _>>()
      .map_err(|err| XWordError::Dictionary(format!("Failed to read {}: {err}", path.display())))?;
    Ok(Self::from_words(lines.iter().map(String::as_str), lengths))
  }

  fn insert(&mut self, len: u32, word: String) {
    if !self.word_set.insert(word.clone()) {
      return;
    }
    match self.by_length.entry(len) {
      Entry::Occupied(mut entry) => entry.get_mut().push(word),
      Entry::Vacant(entry) => {
        entry.insert(vec![word]);
      }
    }
  }

  pub fn candidates_of_length(&self, len: u32) -> &[String] {
    self.by_length.get(&len).map(Vec::as_slice).unwrap_or_default()
  }

  pub fn contains(&self, word: &str) -> bool {
    self.word_set.contains(word)
  }

  pub fn len(&self) -> usize {
    self.word_set.len()
  }

  pub fn is_empty(&self) -> bool {
    self.word_set.is_empty()
  }

  /// Lengths with at least one word, ascending.
  pub fn lengths(&self) -> impl Iterator<Item = u32> + '_ {
    self.by_length.keys().copied().sorted()
  }
}
