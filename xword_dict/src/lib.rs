#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod word_index;

pub use word_index::WordIndex;
