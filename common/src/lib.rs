#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod crossword;
pub mod html;
